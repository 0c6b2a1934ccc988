use std::fmt;

pub const MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checks {
    pub length: bool,
    pub uppercase: bool,
    pub number: bool,
    pub special: bool,
}

impl Checks {
    pub fn passed(&self) -> u8 {
        [self.length, self.uppercase, self.number, self.special]
            .into_iter()
            .filter(|c| *c)
            .count() as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    Empty,
    Weak,
    Fair,
    Good,
    Strong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Strength::Empty,
            1 => Strength::Weak,
            2 => Strength::Fair,
            3 => Strength::Good,
            _ => Strength::Strong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Empty => "empty",
            Strength::Weak => "weak",
            Strength::Fair => "fair",
            Strength::Good => "good",
            Strength::Strong => "strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub checks: Checks,
    pub score: u8,
    pub strength: Strength,
}

impl Evaluation {
    /// Fill of the strength meter, 0 to 100.
    pub fn percent(&self) -> u8 {
        self.score * 25
    }
}

pub fn evaluate(password: &str) -> Evaluation {
    let checks = Checks {
        length: password.chars().count() >= MIN_LENGTH,
        uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
        number: password.chars().any(|c| c.is_ascii_digit()),
        special: password.chars().any(|c| !c.is_ascii_alphanumeric()),
    };
    let score = checks.passed();
    Evaluation {
        checks,
        score,
        strength: Strength::from_score(score),
    }
}

pub fn strength(password: &str) -> Strength {
    evaluate(password).strength
}
