use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a movie by the store.
pub type MovieId = u64;

/// An award year, always within `Year::MIN..=Year::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Year(i32);

impl Year {
    pub const MIN: i32 = 1900;
    pub const MAX: i32 = 2100;

    pub fn new(value: i32) -> Result<Self, CoreError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(CoreError::InvalidYear {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for Year {
    type Error = CoreError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for i32 {
    fn from(year: Year) -> Self {
        year.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A producer credited on a movie. The name is stored trimmed and is never blank.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Producer(String);

impl Producer {
    pub fn new(name: impl AsRef<str>) -> Result<Self, CoreError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(CoreError::EmptyProducerName);
        }
        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Producer {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Producer> for String {
    fn from(producer: Producer) -> Self {
        producer.0
    }
}

impl fmt::Display for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One award record: a nominated movie, the producers it credits and whether it won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    id: Option<MovieId>,
    year: Year,
    title: String,
    studios: Option<String>,
    producers: Vec<Producer>,
    winner: bool,
}

impl Movie {
    /// Builds a validated movie without an id.
    ///
    /// The title is trimmed and must not be blank, a blank `studios` is stored as
    /// `None`, and `producers` must not be empty. A producer listed twice on the
    /// same movie is kept once, at its first position.
    pub fn new(
        year: Year,
        title: impl AsRef<str>,
        studios: Option<String>,
        producers: Vec<Producer>,
        winner: bool,
    ) -> Result<Self, CoreError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(CoreError::EmptyTitle);
        }
        if producers.is_empty() {
            return Err(CoreError::NoProducers);
        }

        let mut unique: Vec<Producer> = Vec::with_capacity(producers.len());
        for producer in producers {
            if !unique.contains(&producer) {
                unique.push(producer);
            }
        }

        let studios = studios
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            id: None,
            year,
            title: title.to_string(),
            studios,
            producers: unique,
            winner,
        })
    }

    /// Validates raw, untyped fields (as received from CSV or JSON) into a movie.
    pub fn from_raw<I, S>(
        year: i32,
        title: &str,
        studios: Option<&str>,
        producers: I,
        winner: bool,
    ) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let year = Year::new(year)?;
        let producers = producers
            .into_iter()
            .map(Producer::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(year, title, studios.map(str::to_string), producers, winner)
    }

    /// Returns the same movie carrying the given store id.
    pub fn with_id(mut self, id: MovieId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<MovieId> {
        self.id
    }

    pub fn year(&self) -> Year {
        self.year
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn studios(&self) -> Option<&str> {
        self.studios.as_deref()
    }

    pub fn producers(&self) -> &[Producer] {
        &self.producers
    }

    pub fn is_winner(&self) -> bool {
        self.winner
    }
}

/// The number of years between two consecutive wins of a single producer.
///
/// Serializes with the public API field names: `interval`, `previous_win` and
/// `following_win`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProducerInterval {
    producer: Producer,
    #[serde(rename = "interval")]
    gap: u32,
    previous_win: Year,
    following_win: Year,
}

impl ProducerInterval {
    /// Builds an interval, checking that `following_win - previous_win == gap`.
    pub fn new(
        producer: Producer,
        gap: u32,
        previous_win: Year,
        following_win: Year,
    ) -> Result<Self, CoreError> {
        let span = following_win.value() - previous_win.value();
        if span < 0 || span as u32 != gap {
            return Err(CoreError::IntervalMismatch {
                gap,
                previous: previous_win.value(),
                following: following_win.value(),
            });
        }
        Ok(Self {
            producer,
            gap,
            previous_win,
            following_win,
        })
    }

    /// Builds the interval spanning two wins, deriving the gap from the years.
    pub fn between(
        producer: Producer,
        previous_win: Year,
        following_win: Year,
    ) -> Result<Self, CoreError> {
        let span = following_win.value() - previous_win.value();
        let gap = u32::try_from(span).map_err(|_| CoreError::IntervalMismatch {
            gap: 0,
            previous: previous_win.value(),
            following: following_win.value(),
        })?;
        Self::new(producer, gap, previous_win, following_win)
    }

    /// Builds the interval covering two wins given in either order.
    pub fn spanning(producer: Producer, a: Year, b: Year) -> Self {
        let (previous_win, following_win) = if a <= b { (a, b) } else { (b, a) };
        Self {
            producer,
            gap: following_win.value().abs_diff(previous_win.value()),
            previous_win,
            following_win,
        }
    }

    pub fn producer(&self) -> &Producer {
        &self.producer
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    pub fn previous_win(&self) -> Year {
        self.previous_win
    }

    pub fn following_win(&self) -> Year {
        self.following_win
    }
}
