use crate::report::{IntervalReport, ProducerIntervals};
use core_types::{Movie, Producer, ProducerInterval, Year};
use std::collections::BTreeMap;

/// A stateless calculator for the gaps between a producer's consecutive wins.
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalCalculator {}

impl IntervalCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every producer's consecutive-win intervals.
    ///
    /// Only winning movies are considered. A movie crediting several producers
    /// counts as a win for each of them. A producer with `k >= 2` wins gets
    /// exactly `k - 1` intervals, in chronological order; producers with fewer
    /// wins are absent from the result.
    pub fn compute_all_intervals(&self, movies: &[Movie]) -> ProducerIntervals {
        let wins_by_producer = Self::group_wins_by_producer(movies);
        let mut intervals = ProducerIntervals::new();

        for (producer, mut years) in wins_by_producer {
            if years.len() < 2 {
                continue;
            }
            years.sort();

            let producer_intervals = Self::intervals_for_producer(producer, &years);
            if !producer_intervals.is_empty() {
                intervals.insert(producer.name().to_string(), producer_intervals);
            }
        }

        tracing::debug!(
            movies = movies.len(),
            producers = intervals.len(),
            "Computed producer intervals."
        );
        intervals
    }

    /// Finds the intervals with the globally shortest and longest gap.
    ///
    /// All ties are reported on both sides. When only one interval exists it
    /// is both the minimum and the maximum. No intervals at all yields an
    /// empty report.
    pub fn compute_extremal_intervals(&self, movies: &[Movie]) -> IntervalReport {
        let all_intervals = self.compute_all_intervals(movies);
        self.summarize(&all_intervals)
    }

    /// Reduces an already computed breakdown to its min/max tie sets.
    ///
    /// Intervals are visited producer by producer (name order), then
    /// chronologically, and each tie set keeps that order.
    pub fn summarize(&self, all_intervals: &ProducerIntervals) -> IntervalReport {
        let flat: Vec<&ProducerInterval> = all_intervals.values().flatten().collect();

        let extremes = flat
            .iter()
            .map(|interval| interval.gap())
            .fold(None, |acc: Option<(u32, u32)>, gap| match acc {
                None => Some((gap, gap)),
                Some((lo, hi)) => Some((lo.min(gap), hi.max(gap))),
            });

        let Some((min_gap, max_gap)) = extremes else {
            return IntervalReport::new();
        };

        let collect_gap = |gap: u32| -> Vec<ProducerInterval> {
            flat.iter()
                .filter(|interval| interval.gap() == gap)
                .map(|interval| (*interval).clone())
                .collect()
        };

        IntervalReport {
            min: collect_gap(min_gap),
            max: collect_gap(max_gap),
        }
    }

    /// Collects the win years of every producer credited on a winning movie.
    fn group_wins_by_producer(movies: &[Movie]) -> BTreeMap<&Producer, Vec<Year>> {
        let mut wins: BTreeMap<&Producer, Vec<Year>> = BTreeMap::new();

        for movie in movies.iter().filter(|m| m.is_winner()) {
            for producer in movie.producers() {
                wins.entry(producer).or_default().push(movie.year());
            }
        }

        wins
    }

    /// Walks consecutive pairs of sorted win years.
    fn intervals_for_producer(producer: &Producer, sorted_years: &[Year]) -> Vec<ProducerInterval> {
        sorted_years
            .windows(2)
            .map(|pair| ProducerInterval::spanning(producer.clone(), pair[0], pair[1]))
            .collect()
    }
}
