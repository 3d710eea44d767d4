use std::time::Duration;

use crate::error::ValidationError;

/// A scripted prompt shown once its offset from session start is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub offset: Duration,
    pub text: String,
}

impl Cue {
    pub fn new(offset: Duration, text: impl Into<String>) -> Self {
        Self {
            offset,
            text: text.into(),
        }
    }

    pub fn at_secs(secs: u64, text: impl Into<String>) -> Self {
        Self::new(Duration::from_secs(secs), text)
    }
}

/// Index of the next cue that has not fired yet.
///
/// Only ever moves forward; owned by the engine running the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct CueCursor(usize);

impl CueCursor {
    pub const START: CueCursor = CueCursor(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Immutable, offset-ordered list of cues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueScript {
    cues: Vec<Cue>,
}

impl CueScript {
    /// Build a script, rejecting offsets that go backwards.
    ///
    /// Equal offsets are allowed and fire in the order given.
    pub fn new(cues: Vec<Cue>) -> Result<Self, ValidationError> {
        for (index, pair) in cues.windows(2).enumerate() {
            if pair[1].offset < pair[0].offset {
                return Err(ValidationError::UnorderedCue {
                    index: index + 1,
                    offset_secs: pair[1].offset.as_secs_f64(),
                });
            }
        }
        Ok(Self { cues })
    }

    /// Convenience constructor from whole-second offsets.
    pub fn from_secs(cues: &[(u64, &str)]) -> Result<Self, ValidationError> {
        Self::new(
            cues.iter()
                .map(|&(secs, text)| Cue::at_secs(secs, text))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Cues that became due since `cursor`, in script order, plus the
    /// advanced cursor.
    ///
    /// A cue is due when `offset <= elapsed`. Large jumps in `elapsed`
    /// release every skipped cue at once, still in order. Feeding the
    /// returned cursor back in with the same `elapsed` yields nothing.
    pub fn next_due(&self, cursor: CueCursor, elapsed: Duration) -> (&[Cue], CueCursor) {
        let start = cursor.0.min(self.cues.len());
        let pending = &self.cues[start..];
        let due = pending.partition_point(|cue| cue.offset <= elapsed);
        (&pending[..due], CueCursor(start + due))
    }

    /// Index of the last cue whose offset is `<= elapsed`, if any.
    pub fn current_index(&self, elapsed: Duration) -> Option<usize> {
        self.cues
            .partition_point(|cue| cue.offset <= elapsed)
            .checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(cues: &[Cue]) -> Vec<&str> {
        cues.iter().map(|c| c.text.as_str()).collect()
    }

    fn sample() -> CueScript {
        CueScript::from_secs(&[(0, "A"), (5, "B"), (5, "C"), (10, "D")]).unwrap()
    }

    #[test]
    fn emits_cues_as_offsets_are_reached() {
        let script = sample();

        let (due, cursor) = script.next_due(CueCursor::START, Duration::ZERO);
        assert_eq!(texts(due), ["A"]);

        let (due, cursor) = script.next_due(cursor, Duration::from_secs(6));
        assert_eq!(texts(due), ["B", "C"]);

        let (due, cursor) = script.next_due(cursor, Duration::from_secs(10));
        assert_eq!(texts(due), ["D"]);
        assert_eq!(cursor.index(), 4);
    }

    #[test]
    fn advanced_cursor_does_not_refire() {
        let script = sample();
        let (first, cursor) = script.next_due(CueCursor::START, Duration::from_secs(6));
        assert_eq!(first.len(), 3);

        let (second, again) = script.next_due(cursor, Duration::from_secs(6));
        assert!(second.is_empty());
        assert_eq!(again, cursor);
    }

    #[test]
    fn jump_releases_all_skipped_cues_in_order() {
        let script = sample();
        let (due, cursor) = script.next_due(CueCursor::START, Duration::from_secs(60));
        assert_eq!(texts(due), ["A", "B", "C", "D"]);
        assert_eq!(cursor.index(), script.len());
    }

    #[test]
    fn nothing_due_before_first_offset() {
        let script = CueScript::from_secs(&[(8, "late")]).unwrap();
        let (due, cursor) = script.next_due(CueCursor::START, Duration::from_millis(7_999));
        assert!(due.is_empty());
        assert_eq!(cursor, CueCursor::START);
    }

    #[test]
    fn empty_script_is_a_no_op() {
        let script = CueScript::empty();
        let (due, cursor) = script.next_due(CueCursor::START, Duration::from_secs(100));
        assert!(due.is_empty());
        assert_eq!(cursor, CueCursor::START);
    }

    #[test]
    fn rejects_decreasing_offsets() {
        let err = CueScript::from_secs(&[(0, "a"), (10, "b"), (9, "c")]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnorderedCue {
                index: 2,
                offset_secs: 9.0
            }
        );
    }

    #[test]
    fn current_index_tracks_latest_reached_cue() {
        let script = sample();
        assert_eq!(script.current_index(Duration::ZERO), Some(0));
        assert_eq!(script.current_index(Duration::from_secs(7)), Some(2));
        assert_eq!(script.current_index(Duration::from_secs(99)), Some(3));

        let late = CueScript::from_secs(&[(3, "x")]).unwrap();
        assert_eq!(late.current_index(Duration::from_secs(1)), None);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_cue_fires_once_in_order(
                mut offsets in prop::collection::vec(0u64..600, 0..40),
                steps in prop::collection::vec(1u64..90, 1..60),
            ) {
                offsets.sort_unstable();
                let cues: Vec<Cue> = offsets
                    .iter()
                    .enumerate()
                    .map(|(i, &o)| Cue::at_secs(o, i.to_string()))
                    .collect();
                let script = CueScript::new(cues).unwrap();

                let mut cursor = CueCursor::START;
                let mut elapsed = Duration::ZERO;
                let mut fired = Vec::new();
                for step in steps {
                    elapsed += Duration::from_secs(step);
                    let (due, next) = script.next_due(cursor, elapsed);
                    for cue in due {
                        prop_assert!(cue.offset <= elapsed);
                        fired.push(cue.text.clone());
                    }
                    cursor = next;
                }
                let (rest, _) = script.next_due(cursor, Duration::from_secs(10_000));
                fired.extend(rest.iter().map(|c| c.text.clone()));

                let expected: Vec<String> = (0..offsets.len()).map(|i| i.to_string()).collect();
                prop_assert_eq!(fired, expected);
            }
        }
    }
}
