// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! LTE RRC information elements.
//!
//! Each IE packs its fields in ASN.1 order with the primitives of
//! [`crate::encoding::per`] and renders itself as JSON with the ASN.1 field
//! names, which are also the names accepted as serde input.

pub mod csi_process;
pub mod csi_rs_cfg_nzp;
pub mod periodicity;
pub mod registry;

pub use csi_process::{AltCodebookEnabledBfR13, BfK1aR13, BfKnR13, CbsrSelR13, NonPrecodedR13, PCAndCbsrR13};
pub use csi_rs_cfg_nzp::{
    AntPortsCountR11, CrsPortsCountR11, CsiRsCfgNzpR11, FreqDensityR14, MbsfnSfCfg,
    MbsfnSfCfgListSetup, QclCrsInfoR11, RadioframeAllocPeriod, SfAlloc, MAX_MBSFN_ALLOCS,
};
pub use periodicity::PeriodicityStartPosR16;
pub use registry::{global_registry, IeCodec, IeHandle, IeRegistry, TypedIe};
