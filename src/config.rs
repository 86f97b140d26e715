//! Table setup, validated once before any hand is dealt.

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 9;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("at least 2 players are required, got {0}")]
    TooFewPlayers(usize),
    #[error("at most 9 players are supported, got {0}")]
    TooManyPlayers(usize),
    #[error("big blind must be positive")]
    ZeroBigBlind,
    #[error("small blind {small} exceeds big blind {big}")]
    SmallBlindExceedsBigBlind { small: u64, big: u64 },
    #[error("expected {expected} names, got {got}")]
    NameCount { expected: usize, got: usize },
    #[error("dealer seat {0} is not at the table")]
    DealerOutOfRange(usize),
    #[error("fewer than two seats have chips")]
    NotEnoughFundedPlayers,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct TableConfig {
    pub(crate) names: Vec<String>,
    pub(crate) stacks: Vec<u64>,
    pub(crate) small_blind: u64,
    pub(crate) big_blind: u64,
    pub(crate) dealer: usize,
    pub(crate) seed: Option<u64>,
}

impl TableConfig {
    /// Equal stacks for every seat, players named P1..Pn, dealer at seat 0.
    pub fn new(
        num_players: usize,
        starting_stack: u64,
        small_blind: u64,
        big_blind: u64,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .players(num_players)
            .starting_stack(starting_stack)
            .blinds(small_blind, big_blind)
            .build()
    }

    pub fn builder() -> TableConfigBuilder {
        TableConfigBuilder::default()
    }

    pub fn num_players(&self) -> usize {
        self.stacks.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn stacks(&self) -> &[u64] {
        &self.stacks
    }

    pub fn small_blind(&self) -> u64 {
        self.small_blind
    }

    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    /// Dealer seat for the first hand.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for TableConfig {
    /// Six seats of 1000 chips, blinds 5/10, dealer at seat 0.
    fn default() -> Self {
        Self {
            names: (1..=6).map(|i| format!("P{i}")).collect(),
            stacks: vec![1000; 6],
            small_blind: 5,
            big_blind: 10,
            dealer: 0,
            seed: None,
        }
    }
}

/// Builder for [`TableConfig`].
///
/// ```
/// use holdem_trainer::config::TableConfig;
///
/// let cfg = TableConfig::builder()
///     .stacks(vec![200, 150, 80])
///     .blinds(1, 2)
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(cfg.num_players(), 3);
/// assert_eq!(cfg.names()[2], "P3");
/// ```
#[derive(Debug, Clone)]
pub struct TableConfigBuilder {
    num_players: usize,
    starting_stack: u64,
    stacks: Option<Vec<u64>>,
    names: Option<Vec<String>>,
    small_blind: u64,
    big_blind: u64,
    dealer: usize,
    seed: Option<u64>,
}

impl Default for TableConfigBuilder {
    fn default() -> Self {
        Self {
            num_players: 6,
            starting_stack: 1000,
            stacks: None,
            names: None,
            small_blind: 5,
            big_blind: 10,
            dealer: 0,
            seed: None,
        }
    }
}

impl TableConfigBuilder {
    pub fn players(mut self, n: usize) -> Self {
        self.num_players = n;
        self
    }

    pub fn starting_stack(mut self, stack: u64) -> Self {
        self.starting_stack = stack;
        self
    }

    /// Per-seat stacks; overrides `players` and `starting_stack`.
    pub fn stacks(mut self, stacks: Vec<u64>) -> Self {
        self.stacks = Some(stacks);
        self
    }

    pub fn names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn blinds(mut self, small: u64, big: u64) -> Self {
        self.small_blind = small;
        self.big_blind = big;
        self
    }

    pub fn dealer(mut self, seat: usize) -> Self {
        self.dealer = seat;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<TableConfig, ConfigError> {
        let stacks = self.stacks.unwrap_or_else(|| vec![self.starting_stack; self.num_players]);
        let n = stacks.len();
        if n < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(n));
        }
        if n > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers(n));
        }
        if self.big_blind == 0 {
            return Err(ConfigError::ZeroBigBlind);
        }
        if self.small_blind > self.big_blind {
            return Err(ConfigError::SmallBlindExceedsBigBlind {
                small: self.small_blind,
                big: self.big_blind,
            });
        }
        if self.dealer >= n {
            return Err(ConfigError::DealerOutOfRange(self.dealer));
        }
        if stacks.iter().filter(|&&s| s > 0).count() < MIN_PLAYERS {
            return Err(ConfigError::NotEnoughFundedPlayers);
        }
        let names = match self.names {
            Some(names) if names.len() != n => {
                return Err(ConfigError::NameCount { expected: n, got: names.len() })
            }
            Some(names) => names,
            None => (1..=n).map(|i| format!("P{i}")).collect(),
        };
        Ok(TableConfig {
            names,
            stacks,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            dealer: self.dealer,
            seed: self.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_size_bounds() {
        assert_eq!(TableConfig::new(1, 100, 1, 2), Err(ConfigError::TooFewPlayers(1)));
        assert_eq!(TableConfig::new(10, 100, 1, 2), Err(ConfigError::TooManyPlayers(10)));
        assert!(TableConfig::new(2, 100, 1, 2).is_ok());
        assert!(TableConfig::new(9, 100, 1, 2).is_ok());
    }

    #[test]
    fn blind_rules() {
        assert_eq!(TableConfig::new(3, 100, 0, 0), Err(ConfigError::ZeroBigBlind));
        assert_eq!(
            TableConfig::new(3, 100, 5, 2),
            Err(ConfigError::SmallBlindExceedsBigBlind { small: 5, big: 2 })
        );
        assert!(TableConfig::new(3, 100, 0, 2).is_ok());
    }

    #[test]
    fn names_and_dealer_are_checked() {
        let err = TableConfig::builder().players(3).names(vec!["a", "b"]).build().unwrap_err();
        assert_eq!(err, ConfigError::NameCount { expected: 3, got: 2 });
        let err = TableConfig::builder().players(3).dealer(3).build().unwrap_err();
        assert_eq!(err, ConfigError::DealerOutOfRange(3));
    }

    #[test]
    fn needs_two_funded_seats() {
        let err = TableConfig::builder().stacks(vec![100, 0, 0]).build().unwrap_err();
        assert_eq!(err, ConfigError::NotEnoughFundedPlayers);
    }
}
