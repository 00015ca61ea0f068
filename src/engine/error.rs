// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("no active debts: add or include at least one debt with a balance")]
    NoActiveDebts,

    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    #[error("unknown strategy '{0}' (use snowball|avalanche)")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
