//! Single-pass notation scanner.
//!
//! The grammar is total: bytes that are neither operators nor number
//! characters are skipped, so the only failure is running out of grid.

use log::{debug, warn};

use crate::action::{Action, ActionGrid};
use crate::config::Config;
use crate::error::ParseError;
use crate::interp::{Easing, EasingTable};
use crate::registry::{OperatorRegistry, EASING, INVERT, PAUSE, PIPE};
use crate::target::AnimationTarget;

pub struct Parser<'a> {
    registry: &'a OperatorRegistry,
    easings: &'a EasingTable,
    cfg: &'a Config,
}

/// What the operator scan stopped on.
enum Token {
    Op(u8),
    End,
}

impl<'a> Parser<'a> {
    pub fn new(registry: &'a OperatorRegistry, easings: &'a EasingTable, cfg: &'a Config) -> Self {
        Self {
            registry,
            easings,
            cfg,
        }
    }

    pub fn parse(
        &self,
        notation: &str,
        target: &dyn AnimationTarget,
    ) -> Result<ActionGrid, ParseError> {
        let bytes = notation.as_bytes();
        let mut grid = ActionGrid::with_capacity(self.cfg.max_pipes, self.cfg.max_actions);
        let mut easing = self
            .easings
            .get(self.cfg.default_easing)
            .unwrap_or(Easing::InOutQuad);
        let mut pipe = 0usize;
        let mut action_idx = 0usize;
        let mut idx = 0usize;

        while idx < bytes.len() {
            let mut inverse = false;
            let mut token = Token::End;

            while idx < bytes.len() {
                let c = bytes[idx];
                idx += 1;
                match c {
                    INVERT => inverse = true,
                    PIPE => {
                        pipe += 1;
                        action_idx = 0;
                    }
                    PAUSE => {
                        if action_idx != 0 {
                            pipe += 1;
                        }
                        grid.push(pipe, Action::pause(self.cfg.pause_duration(), easing))?;
                        pipe += 1;
                        action_idx = 0;
                    }
                    c if self.registry.is_operator(c) => {
                        token = Token::Op(c);
                        break;
                    }
                    _ => {}
                }
            }

            while idx < bytes.len()
                && !OperatorRegistry::is_number(bytes[idx])
                && !self.registry.is_operator(bytes[idx])
            {
                idx += 1;
            }

            let literal = if idx < bytes.len() && OperatorRegistry::is_number(bytes[idx]) {
                let (value, next) = self.read_number(bytes, idx);
                idx = next;
                if value.is_finite() {
                    Some(value)
                } else {
                    warn!("laba: literal overflowed to {}, using the operator default", value);
                    None
                }
            } else {
                None
            };

            let Token::Op(c) = token else {
                continue;
            };
            if c == EASING {
                easing = self.select_easing(literal, easing);
            } else if let Some(op) = self.registry.lookup(c) {
                grid.push(
                    pipe,
                    Action::new(op, inverse, literal, easing, target, self.cfg),
                )?;
                action_idx += 1;
            }
        }

        debug!(
            "laba: parsed {:?} into {} active pipe(s), {} action(s)",
            notation,
            grid.active_pipes().count(),
            grid.iter().count()
        );
        Ok(grid)
    }

    /// Read a literal starting at a number character. Only the leading sign
    /// counts; later signs are ignored and every `.` after the first is a
    /// no-op. Returns the value and the index of the stopping operator.
    fn read_number(&self, bytes: &[u8], mut idx: usize) -> (f64, usize) {
        let negative = match bytes[idx] {
            b'-' => {
                idx += 1;
                true
            }
            b'+' => {
                idx += 1;
                false
            }
            _ => false,
        };

        let mut value = 0.0f64;
        let mut fractional = false;
        let mut divisor = 10.0f64;
        while idx < bytes.len() {
            let c = bytes[idx];
            if self.registry.is_operator(c) {
                break;
            }
            if c.is_ascii_digit() {
                let digit = f64::from(c - b'0');
                if fractional {
                    value += digit / divisor;
                    divisor *= 10.0;
                } else {
                    value = value * 10.0 + digit;
                }
            } else if c == b'.' {
                fractional = true;
            }
            idx += 1;
        }

        (if negative { -value } else { value }, idx)
    }

    fn select_easing(&self, literal: Option<f64>, current: Easing) -> Easing {
        let Some(raw) = literal else {
            warn!("laba: easing switch without an index ignored");
            return current;
        };
        let index = raw.trunc();
        if index >= 0.0 {
            if let Some(next) = self.easings.get(index as usize) {
                return next;
            }
        }
        warn!(
            "laba: easing index {} out of range (0..{}), keeping {}",
            raw,
            self.easings.len(),
            current.name()
        );
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Operator;
    use crate::target::TargetState;

    fn parse(notation: &str) -> ActionGrid {
        parse_with(notation, &Config::default())
    }

    fn parse_with(notation: &str, cfg: &Config) -> ActionGrid {
        let registry = OperatorRegistry::new();
        let easings = EasingTable::new();
        Parser::new(&registry, &easings, cfg)
            .parse(notation, &TargetState::with_size(40.0, 20.0))
            .unwrap()
    }

    #[test]
    fn reads_signed_and_fractional_literals() {
        let grid = parse("x-12.5y+3z.25");
        let values: Vec<_> = grid.iter().map(|a| a.value()).collect();
        assert_eq!(values, vec![-12.5, 3.0, 0.25]);
    }

    #[test]
    fn interior_signs_and_points_are_ignored() {
        let grid = parse("x1-2.3.4");
        let a = &grid.pipe(0).unwrap()[0];
        assert!((a.value() - 12.34).abs() < 1e-12);
    }

    #[test]
    fn junk_between_operator_and_literal_is_skipped() {
        let grid = parse("> abc 30 q1");
        let a = &grid.pipe(0).unwrap()[0];
        assert_eq!(a.operator(), Operator::MoveRight);
        assert_eq!(a.value(), 301.0);
    }

    #[test]
    fn missing_literal_uses_measurement() {
        let grid = parse("<^");
        let pipe = grid.pipe(0).unwrap();
        assert_eq!(pipe[0].literal(), None);
        assert_eq!(pipe[0].value(), 40.0);
        assert_eq!(pipe[1].value(), 20.0);
    }

    #[test]
    fn invert_applies_to_next_operator_only() {
        let grid = parse("!x5y5");
        let pipe = grid.pipe(0).unwrap();
        assert!(pipe[0].is_inverse());
        assert!(!pipe[1].is_inverse());
    }

    #[test]
    fn pipes_and_pauses() {
        let grid = parse("<|>,^");
        let active: Vec<_> = grid.active_pipes().collect();
        assert_eq!(active, vec![0, 1, 2, 3]);
        let pause = &grid.pipe(2).unwrap()[0];
        assert_eq!(pause.operator(), Operator::Duration);
        assert!((pause.value() - 0.87 * 0.26).abs() < 1e-12);
    }

    #[test]
    fn leading_pause_does_not_skip_a_pipe() {
        let grid = parse(",>");
        assert_eq!(grid.active_pipes().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn easing_switch_applies_forward() {
        let grid = parse("x1e0y1e99z1");
        let pipe = grid.pipe(0).unwrap();
        assert_eq!(pipe[0].easing(), Easing::InOutQuad);
        assert_eq!(pipe[1].easing(), Easing::Linear);
        assert_eq!(pipe[2].easing(), Easing::Linear);
    }

    #[test]
    fn easing_index_is_truncated() {
        let grid = parse("e1.9x1");
        assert_eq!(grid.pipe(0).unwrap()[0].easing(), Easing::InQuad);
    }

    #[test]
    fn unknown_letters_are_inert() {
        let grid = parse("qkj");
        assert!(grid.is_empty());
    }

    #[test]
    fn overflowing_literal_falls_back_to_default() {
        let notation = format!("d{}x1", "9".repeat(400));
        let grid = parse(&notation);
        let pipe = grid.pipe(0).unwrap();
        assert_eq!(pipe[0].operator(), Operator::Duration);
        assert_eq!(pipe[0].literal(), None);
        assert!((pipe[0].value() - 0.87).abs() < 1e-12);

        let grid = parse(&format!("x-{}", "9".repeat(400)));
        let a = &grid.pipe(0).unwrap()[0];
        assert_eq!(a.literal(), None);
        assert!(a.value().is_finite());
    }

    fn assert_total(notation: &str) {
        let registry = OperatorRegistry::new();
        let easings = EasingTable::new();
        let cfg = Config::default();
        match Parser::new(&registry, &easings, &cfg).parse(notation, &TargetState::default()) {
            Ok(grid) => {
                for action in grid.iter() {
                    assert!(action.value().is_finite(), "{notation:?}");
                }
            }
            Err(ParseError::CapacityExceeded { .. }) => {}
        }
    }

    #[test]
    fn every_ascii_byte_parses() {
        for b in 0u8..128 {
            let c = char::from(b);
            assert_total(&c.to_string());
            assert_total(&format!("{c}{c}{c}"));
            assert_total(&format!("x{c}1"));
            assert_total(&format!("{c}-.5"));
        }
    }

    #[test]
    fn mixed_operator_and_junk_strings_parse() {
        const ALPHABET: &[u8] = b"<>^vxyzrRsSfdDLlae!|,[]-+.0123456789 qk#\t\\\"";
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let len = (seed >> 24) as usize % 48;
            let notation: String = (0..len)
                .map(|_| {
                    seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                    char::from(ALPHABET[(seed >> 16) as usize % ALPHABET.len()])
                })
                .collect();
            assert_total(&notation);
        }
        assert_total(&"|".repeat(100));
        assert_total(&",".repeat(100));
        assert_total(&"x".repeat(100));
        assert_total("é漢字<10");
    }

    #[test]
    fn capacity_overflow_is_reported() {
        let cfg = Config {
            max_pipes: 2,
            ..Config::default()
        };
        let registry = OperatorRegistry::new();
        let easings = EasingTable::new();
        let err = Parser::new(&registry, &easings, &cfg)
            .parse("x|y|z", &TargetState::default())
            .unwrap_err();
        assert!(matches!(err, ParseError::CapacityExceeded { pipe: 2, .. }));
    }
}
