// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod debts;
pub mod settings;
pub mod oneoffs;
pub mod plan;
pub mod compare;
pub mod advise;
pub mod payments;
pub mod importer;
pub mod exporter;
pub mod doctor;
