// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use rrc_per::encoding::per::{BitCursor, BitWriter};
use rrc_per::ies::{
    AntPortsCountR11, CrsPortsCountR11, CsiRsCfgNzpR11, FreqDensityR14, QclCrsInfoR11,
};
use rrc_per::Result;

// ============================================================================
// Bit Helpers
// ============================================================================

/// Bits written so far, MSB first, without separators.
pub fn bits_of(w: &BitWriter) -> String {
    bits_of_bytes(w.as_bytes(), w.distance())
}

/// First `n_bits` bits of `data`, MSB first, without separators.
pub fn bits_of_bytes(data: &[u8], n_bits: usize) -> String {
    let mut cursor = BitCursor::new(data);
    (0..n_bits)
        .map(|_| match cursor.read_bool() {
            Ok(true) => '1',
            Ok(false) => '0',
            Err(e) => panic!("bit string longer than buffer: {e}"),
        })
        .collect()
}

/// Run `f` on a fresh unaligned writer.
pub fn pack_with<F>(f: F) -> BitWriter
where
    F: FnOnce(&mut BitWriter) -> Result<()>,
{
    let mut w = BitWriter::new();
    f(&mut w).unwrap();
    w
}

// ============================================================================
// Sample Information Elements
// ============================================================================

/// CSI-RS-ConfigNZP-r11 with root fields only.
pub fn csi_rs_root_only() -> CsiRsCfgNzpR11 {
    CsiRsCfgNzpR11 {
        csi_rs_cfg_nzp_id_r11: 2,
        ant_ports_count_r11: AntPortsCountR11::An4,
        res_cfg_r11: 17,
        sf_cfg_r11: 100,
        scrambling_id_r11: 503,
        ..CsiRsCfgNzpR11::default()
    }
}

/// CSI-RS-ConfigNZP-r11 carrying both extension groups and QCL info.
pub fn csi_rs_full() -> CsiRsCfgNzpR11 {
    CsiRsCfgNzpR11 {
        qcl_crs_info_r11: Some(QclCrsInfoR11 {
            qcl_scrambling_id_r11: 42,
            crs_ports_count_r11: CrsPortsCountR11::N2,
            mbsfn_sf_cfg_list_r11: None,
        }),
        csi_rs_cfg_nzp_id_v1310: Some(24),
        tx_comb_r14: Some(2),
        freq_density_r14: Some(FreqDensityR14::D2),
        ..csi_rs_root_only()
    }
}
