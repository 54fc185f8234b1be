use serde::Serialize;

use crate::scoring::Month;

/// Score anchors for tier boundaries; tier *t* spans `SCALE[t-1]..=SCALE[t]`.
pub const SCORE_SCALE: [f64; 8] = [0.0, 143.0, 286.0, 429.0, 571.0, 714.0, 857.0, 1000.0];

const TIER_ONE_SCORE: f64 = 10.0;

/// Seven-tier ladder of upper bounds; the last tier is open-ended and uses
/// `ceiling` as its interpolation limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLadder {
    pub bounds: [f64; 6],
    pub ceiling: f64,
}

pub const RAINFALL_LADDER: TierLadder = TierLadder {
    bounds: [75.0, 150.0, 250.0, 400.0, 600.0, 800.0],
    ceiling: 1200.0,
};

pub const RAINY_DAYS_LADDER: TierLadder = TierLadder {
    bounds: [5.0, 8.0, 12.0, 16.0, 20.0, 25.0],
    ceiling: 31.0,
};

pub const HUMIDITY_LADDER: TierLadder = TierLadder {
    bounds: [60.0, 70.0, 75.0, 80.0, 85.0, 90.0],
    ceiling: 100.0,
};

impl TierLadder {
    /// 1-based tier: the first tier whose bound the value does not exceed.
    pub fn tier(&self, value: f64) -> u8 {
        self.bounds
            .iter()
            .position(|bound| value <= *bound)
            .map(|index| index as u8 + 1)
            .unwrap_or(7)
    }

    /// Linear position of `value` inside its tier, mapped onto the score scale.
    pub fn score(&self, value: f64) -> f64 {
        let tier = self.tier(value) as usize;
        if tier == 1 {
            return TIER_ONE_SCORE;
        }

        let lower = self.bounds[tier - 2];
        let upper = self.bounds.get(tier - 1).copied().unwrap_or(self.ceiling);
        let fraction = if upper > lower {
            ((value - lower) / (upper - lower)).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let (low_score, high_score) = (SCORE_SCALE[tier - 1], SCORE_SCALE[tier]);

        (low_score + fraction * (high_score - low_score)).clamp(TIER_ONE_SCORE, 1000.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ClimateFactor {
    Rainfall,
    #[serde(rename = "Rainy Days")]
    RainyDays,
    Humidity,
}

impl ClimateFactor {
    pub const fn label(self) -> &'static str {
        match self {
            ClimateFactor::Rainfall => "Rainfall",
            ClimateFactor::RainyDays => "Rainy Days",
            ClimateFactor::Humidity => "Humidity",
        }
    }

    /// Hazard wording used when this factor limits a month.
    pub const fn hazard(self) -> &'static str {
        match self {
            ClimateFactor::Rainfall => "Excessive rainfall",
            ClimateFactor::RainyDays => "Frequent rainy days",
            ClimateFactor::Humidity => "High humidity",
        }
    }

    const fn ladder(self) -> &'static TierLadder {
        match self {
            ClimateFactor::Rainfall => &RAINFALL_LADDER,
            ClimateFactor::RainyDays => &RAINY_DAYS_LADDER,
            ClimateFactor::Humidity => &HUMIDITY_LADDER,
        }
    }
}

/// Tie-break order when several factors share the worst tier.
pub(crate) const LIMITING_FACTOR_PRECEDENCE: [ClimateFactor; 3] = [
    ClimateFactor::RainyDays,
    ClimateFactor::Humidity,
    ClimateFactor::Rainfall,
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyClimate {
    pub month: Month,
    pub rainfall: f64,
    pub rainy_days: f64,
    pub humidity: f64,
    pub rainfall_tier: u8,
    pub rainy_days_tier: u8,
    pub humidity_tier: u8,
    pub tier: u8,
    pub limiting_factor: ClimateFactor,
    pub score: u16,
}

impl MonthlyClimate {
    fn value_of(&self, factor: ClimateFactor) -> f64 {
        match factor {
            ClimateFactor::Rainfall => self.rainfall,
            ClimateFactor::RainyDays => self.rainy_days,
            ClimateFactor::Humidity => self.humidity,
        }
    }

    fn tier_of(&self, factor: ClimateFactor) -> u8 {
        match factor {
            ClimateFactor::Rainfall => self.rainfall_tier,
            ClimateFactor::RainyDays => self.rainy_days_tier,
            ClimateFactor::Humidity => self.humidity_tier,
        }
    }
}

pub fn score_month(month: Month, rainfall: f64, rainy_days: f64, humidity: f64) -> MonthlyClimate {
    let mut breakdown = MonthlyClimate {
        month,
        rainfall,
        rainy_days,
        humidity,
        rainfall_tier: RAINFALL_LADDER.tier(rainfall),
        rainy_days_tier: RAINY_DAYS_LADDER.tier(rainy_days),
        humidity_tier: HUMIDITY_LADDER.tier(humidity),
        tier: 1,
        limiting_factor: ClimateFactor::RainyDays,
        score: 0,
    };

    let tier = breakdown
        .rainfall_tier
        .max(breakdown.rainy_days_tier)
        .max(breakdown.humidity_tier);
    let limiting = LIMITING_FACTOR_PRECEDENCE
        .into_iter()
        .find(|factor| breakdown.tier_of(*factor) == tier)
        .unwrap_or(ClimateFactor::RainyDays);

    let score = limiting.ladder().score(breakdown.value_of(limiting));
    breakdown.tier = tier;
    breakdown.limiting_factor = limiting;
    breakdown.score = score.round() as u16;
    breakdown
}
