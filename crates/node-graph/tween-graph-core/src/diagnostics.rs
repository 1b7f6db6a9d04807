//! Structured record of degraded evaluations.
//!
//! Every warning is also logged through `log`; the record exists so hosts
//! and tests can observe what happened without installing a logger.

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::DiagnosticsCfg;
use crate::ids::{AnimationId, NodeId};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[non_exhaustive]
pub enum Warning {
    /// A division node saw a zero divisor and evaluated to 0.
    DivisionByZero { node: NodeId },
    /// A color node was given input that is not a color.
    UnparseableColor { node: NodeId, input: String },
    /// A frame was requested for an animation that no longer runs.
    StaleFrame { animation: AnimationId },
}

#[derive(Debug, Default)]
pub struct Diagnostics {
    cfg: DiagnosticsCfg,
    records: VecDeque<Warning>,
}

impl Diagnostics {
    pub fn new(cfg: DiagnosticsCfg) -> Self {
        Self {
            cfg,
            records: VecDeque::new(),
        }
    }

    pub(crate) fn record(&mut self, warning: Warning) {
        if !self.cfg.enabled || self.cfg.max_records == 0 {
            return;
        }
        while self.records.len() >= self.cfg.max_records {
            self.records.pop_front();
        }
        self.records.push_back(warning);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Warning> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drain all records.
    pub fn take(&mut self) -> Vec<Warning> {
        self.records.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}
