mod common;
mod harvest;
mod policy;
mod routing;
