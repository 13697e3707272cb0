//! Engine: owns the immutable registry, easing table and config, and is
//! the entry point for parsing, planning, animating and describing.
//!
//! Methods:
//! - new, try_new, parse, plan, animate, describe

use log::debug;

use crate::action::ActionGrid;
use crate::animation::{Animation, Completion};
use crate::config::Config;
use crate::describe::{describe_groups, describe_segment, finalize};
use crate::error::{ConfigError, ParseError};
use crate::interp::EasingTable;
use crate::parser::Parser;
use crate::plan::{split_groups, SegmentPlan};
use crate::registry::OperatorRegistry;
use crate::target::AnimationTarget;

#[derive(Debug, Clone)]
pub struct Engine {
    cfg: Config,
    registry: OperatorRegistry,
    easings: EasingTable,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    /// Create an engine with the given config. Use [`Engine::try_new`] for
    /// configs from untrusted sources.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            registry: OperatorRegistry::new(),
            easings: EasingTable::new(),
        }
    }

    pub fn try_new(cfg: Config) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    #[inline]
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    #[inline]
    pub fn easings(&self) -> &EasingTable {
        &self.easings
    }

    /// Parse one segment (no bracket handling) against `target`.
    pub fn parse(
        &self,
        notation: &str,
        target: &dyn AnimationTarget,
    ) -> Result<ActionGrid, ParseError> {
        Parser::new(&self.registry, &self.easings, &self.cfg).parse(notation, target)
    }

    pub fn plan(&self, grid: &ActionGrid) -> SegmentPlan {
        SegmentPlan::from_grid(grid, &self.cfg)
    }

    /// Split bracket groups and parse and plan each one.
    pub fn parse_groups(
        &self,
        notation: &str,
        target: &dyn AnimationTarget,
    ) -> Result<Vec<(ActionGrid, SegmentPlan)>, ParseError> {
        split_groups(notation)
            .iter()
            .map(|group| {
                let grid = self.parse(group, target)?;
                let plan = self.plan(&grid);
                Ok((grid, plan))
            })
            .collect()
    }

    /// Parse every bracket group, then start them all at `now`.
    ///
    /// Nothing is written to `target` on a parse error. `on_complete` goes
    /// to the first group and never fires before the first
    /// [`Animation::update`].
    pub fn animate(
        &self,
        target: &mut dyn AnimationTarget,
        notation: &str,
        now: f64,
        on_complete: Option<Completion>,
    ) -> Result<Animation, ParseError> {
        let segments = self.parse_groups(notation, &*target)?;
        debug!(
            "laba: animate {:?} with {} group(s) at {}",
            notation,
            segments.len(),
            now
        );
        Ok(Animation::start(segments, target, now, on_complete))
    }

    /// Natural-language description of `notation` as it would run on `target`.
    pub fn describe(
        &self,
        target: &dyn AnimationTarget,
        notation: &str,
    ) -> Result<String, ParseError> {
        if notation.is_empty() {
            return Ok(finalize(""));
        }
        let segments = self.parse_groups(notation, target)?;
        let mut texts = Vec::with_capacity(segments.len());
        for (mut grid, plan) in segments {
            let mut text = String::new();
            describe_segment(&mut grid, &plan, target, &mut text);
            texts.push(text);
        }
        let raw = if notation.contains('[') {
            describe_groups(&texts)
        } else {
            texts.concat()
        };
        Ok(finalize(&raw))
    }
}
