//! Seven-band ladders shared by the baseline, alpha and harvest scores.

/// Baseline and alpha risk labels, tier 1 first.
pub const RISK_LABELS: [&str; 7] = [
    "Very Low",
    "Low",
    "Moderately Low",
    "Moderate",
    "Moderately High",
    "High",
    "Very High",
];

/// Harvest performance labels, tier 1 first. Higher tiers are worse.
pub const PERFORMANCE_LABELS: [&str; 7] = [
    "Exceptional Performance",
    "Strong Performance",
    "Above Average Performance",
    "Moderate Performance",
    "Below Average Performance",
    "Weak Performance",
    "Very Weak Performance",
];

/// Maps a 0–1000 score onto tiers 1–7 with cut points at 100/250/400/550/700/850.
pub fn tier_for_score(score: f64) -> u8 {
    match score {
        s if s < 100.0 => 1,
        s if s < 250.0 => 2,
        s if s < 400.0 => 3,
        s if s < 550.0 => 4,
        s if s < 700.0 => 5,
        s if s < 850.0 => 6,
        _ => 7,
    }
}

pub fn risk_label(tier: u8) -> &'static str {
    RISK_LABELS[usize::from(tier.clamp(1, 7)) - 1]
}

pub fn performance_label(tier: u8) -> &'static str {
    PERFORMANCE_LABELS[usize::from(tier.clamp(1, 7)) - 1]
}
