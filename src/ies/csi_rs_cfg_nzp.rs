// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CSI-RS-ConfigNZP-r11 with its extension groups.
//!
//! ```text
//! CSI-RS-ConfigNZP-r11 ::= SEQUENCE {
//!     csi-RS-ConfigNZPId-r11   INTEGER (1..3),
//!     antennaPortsCount-r11    ENUMERATED {an1, an2, an4, an8},
//!     resourceConfig-r11       INTEGER (0..31),
//!     subframeConfig-r11       INTEGER (0..154),
//!     scramblingIdentity-r11   INTEGER (0..503),
//!     qcl-CRS-Info-r11         SEQUENCE {
//!         qcl-ScramblingIdentity-r11    INTEGER (0..503),
//!         crs-PortsCount-r11            ENUMERATED {n1, n2, n4, spare1},
//!         mbsfn-SubframeConfigList-r11  CHOICE {
//!             release NULL,
//!             setup   SEQUENCE { subframeConfigList MBSFN-SubframeConfigList }
//!         } OPTIONAL
//!     } OPTIONAL,
//!     ...,
//!     [[ csi-RS-ConfigNZPId-v1310  INTEGER (4..24) OPTIONAL ]],
//!     [[ transmissionComb-r14      INTEGER (0..2) OPTIONAL,
//!        frequencyDensity-r14      ENUMERATED {d1, d2, d3} OPTIONAL ]]
//! }
//!
//! MBSFN-SubframeConfigList ::= SEQUENCE (SIZE (1..maxMBSFN-Allocations)) OF MBSFN-SubframeConfig
//!
//! MBSFN-SubframeConfig ::= SEQUENCE {
//!     radioframeAllocationPeriod  ENUMERATED {n1, n2, n4, n8, n16, n32},
//!     radioframeAllocationOffset  INTEGER (0..7),
//!     subframeAllocation          CHOICE {
//!         oneFrame    BIT STRING (SIZE(6)),
//!         fourFrames  BIT STRING (SIZE(24))
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::core::Result as CoreResult;
use crate::encoding::json::{JsonWriter, ToJson};
use crate::encoding::per::{
    pack_choice, pack_integer, pack_open_field, pack_seq_of, unpack_choice, unpack_integer,
    unpack_open_field, unpack_seq_of, BitCursor, BitWriter, ChoiceIndex, Enumerated,
    ExtGroupsPacker, ExtGroupsUnpacker, FixedBitString, PerDecode, PerEncode, SetupRelease,
};

/// maxMBSFN-Allocations
pub const MAX_MBSFN_ALLOCS: usize = 8;

crate::enumerated! {
    /// antennaPortsCount-r11
    pub enum AntPortsCountR11 = "csi_rs_cfg_nzp_r11_s::ant_ports_count_r11_e_" : u8 {
        An1 => "an1" = 1,
        An2 => "an2" = 2,
        An4 => "an4" = 4,
        An8 => "an8" = 8,
    }
}

crate::enumerated! {
    /// crs-PortsCount-r11
    pub enum CrsPortsCountR11 = "csi_rs_cfg_nzp_r11_s::qcl_crs_info_r11_s_::crs_ports_count_r11_e_" {
        N1 => "n1",
        N2 => "n2",
        N4 => "n4",
        Spare1 => "spare1",
    }
}

crate::enumerated! {
    /// frequencyDensity-r14
    pub enum FreqDensityR14 = "csi_rs_cfg_nzp_r11_s::freq_density_r14_e_" : u8 {
        D1 => "d1" = 1,
        D2 => "d2" = 2,
        D3 => "d3" = 3,
    }
}

crate::enumerated! {
    /// radioframeAllocationPeriod
    pub enum RadioframeAllocPeriod = "mbsfn_sf_cfg_s::radioframe_alloc_period_e_" : u8 {
        N1 => "n1" = 1,
        N2 => "n2" = 2,
        N4 => "n4" = 4,
        N8 => "n8" = 8,
        N16 => "n16" = 16,
        N32 => "n32" = 32,
    }
}

// ============================================================================
// MBSFN-SubframeConfig
// ============================================================================

/// subframeAllocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SfAlloc {
    #[serde(rename = "oneFrame")]
    OneFrame(FixedBitString<6>),
    #[serde(rename = "fourFrames")]
    FourFrames(FixedBitString<24>),
}

impl Default for SfAlloc {
    fn default() -> Self {
        SfAlloc::OneFrame(FixedBitString::default())
    }
}

impl SfAlloc {
    /// ASN.1 type name.
    pub const NAME: &'static str = "mbsfn_sf_cfg_s::sf_alloc_c_";
    /// Discriminant shape.
    pub const INDEX: ChoiceIndex = ChoiceIndex::new(2);

    /// Discriminant of the active alternative.
    pub fn type_index(&self) -> u32 {
        match self {
            SfAlloc::OneFrame(_) => 0,
            SfAlloc::FourFrames(_) => 1,
        }
    }
}

impl PerEncode for SfAlloc {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        pack_choice(w, Self::INDEX, self.type_index(), Self::NAME)?;
        match self {
            SfAlloc::OneFrame(c) => c.pack(w),
            SfAlloc::FourFrames(c) => c.pack(w),
        }
    }
}

impl PerDecode for SfAlloc {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(match unpack_choice(r, Self::INDEX, Self::NAME)? {
            0 => SfAlloc::OneFrame(FixedBitString::unpack(r)?),
            _ => SfAlloc::FourFrames(FixedBitString::unpack(r)?),
        })
    }
}

impl ToJson for SfAlloc {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        match self {
            SfAlloc::OneFrame(c) => j.write_str("oneFrame", &c.to_string()),
            SfAlloc::FourFrames(c) => j.write_str("fourFrames", &c.to_string()),
        }
        j.end_obj();
    }
}

/// MBSFN-SubframeConfig
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MbsfnSfCfg {
    #[serde(rename = "radioframeAllocationPeriod")]
    pub radioframe_alloc_period: RadioframeAllocPeriod,
    #[serde(rename = "radioframeAllocationOffset")]
    pub radioframe_alloc_offset: u8,
    #[serde(rename = "subframeAllocation")]
    pub sf_alloc: SfAlloc,
}

impl PerEncode for MbsfnSfCfg {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let aligned = w.aligned();
        self.radioframe_alloc_period.pack(w)?;
        pack_integer(w, self.radioframe_alloc_offset, 0u8, 7u8, false, aligned)?;
        self.sf_alloc.pack(w)
    }
}

impl PerDecode for MbsfnSfCfg {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        Ok(Self {
            radioframe_alloc_period: RadioframeAllocPeriod::unpack(r)?,
            radioframe_alloc_offset: unpack_integer(r, 0u8, 7u8, false, aligned)?,
            sf_alloc: SfAlloc::unpack(r)?,
        })
    }
}

impl ToJson for MbsfnSfCfg {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_str("radioframeAllocationPeriod", self.radioframe_alloc_period.to_str());
        j.write_int("radioframeAllocationOffset", self.radioframe_alloc_offset);
        j.write_fieldname("subframeAllocation");
        self.sf_alloc.to_json(j);
        j.end_obj();
    }
}

/// setup of mbsfn-SubframeConfigList-r11
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MbsfnSfCfgListSetup {
    #[serde(rename = "subframeConfigList")]
    pub sf_cfg_list: Vec<MbsfnSfCfg>,
}

impl PerEncode for MbsfnSfCfgListSetup {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        pack_seq_of(w, &self.sf_cfg_list, 1, MAX_MBSFN_ALLOCS)
    }
}

impl PerDecode for MbsfnSfCfgListSetup {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        Ok(Self {
            sf_cfg_list: unpack_seq_of(r, 1, MAX_MBSFN_ALLOCS)?,
        })
    }
}

impl ToJson for MbsfnSfCfgListSetup {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_fieldname("subframeConfigList");
        self.sf_cfg_list.to_json(j);
        j.end_obj();
    }
}

// ============================================================================
// CSI-RS-ConfigNZP-r11
// ============================================================================

/// qcl-CRS-Info-r11
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QclCrsInfoR11 {
    #[serde(rename = "qcl-ScramblingIdentity-r11")]
    pub qcl_scrambling_id_r11: u16,
    #[serde(rename = "crs-PortsCount-r11")]
    pub crs_ports_count_r11: CrsPortsCountR11,
    #[serde(
        rename = "mbsfn-SubframeConfigList-r11",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mbsfn_sf_cfg_list_r11: Option<SetupRelease<MbsfnSfCfgListSetup>>,
}

impl PerEncode for QclCrsInfoR11 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let aligned = w.aligned();
        w.write_bool(self.mbsfn_sf_cfg_list_r11.is_some())?;
        pack_integer(w, self.qcl_scrambling_id_r11, 0u16, 503u16, false, aligned)?;
        self.crs_ports_count_r11.pack(w)?;
        if let Some(list) = &self.mbsfn_sf_cfg_list_r11 {
            list.pack(w)?;
        }
        Ok(())
    }
}

impl PerDecode for QclCrsInfoR11 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        let mbsfn_present = r.read_bool()?;
        let qcl_scrambling_id_r11 = unpack_integer(r, 0u16, 503u16, false, aligned)?;
        let crs_ports_count_r11 = CrsPortsCountR11::unpack(r)?;
        let mbsfn_sf_cfg_list_r11 = if mbsfn_present {
            Some(SetupRelease::unpack(r)?)
        } else {
            None
        };
        Ok(Self {
            qcl_scrambling_id_r11,
            crs_ports_count_r11,
            mbsfn_sf_cfg_list_r11,
        })
    }
}

impl ToJson for QclCrsInfoR11 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_int("qcl-ScramblingIdentity-r11", self.qcl_scrambling_id_r11);
        j.write_str("crs-PortsCount-r11", self.crs_ports_count_r11.to_str());
        if let Some(list) = &self.mbsfn_sf_cfg_list_r11 {
            j.write_fieldname("mbsfn-SubframeConfigList-r11");
            list.to_json(j);
        }
        j.end_obj();
    }
}

/// CSI-RS-ConfigNZP-r11
///
/// The extension marker is set on the wire whenever a field of an extension
/// group is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsiRsCfgNzpR11 {
    #[serde(rename = "csi-RS-ConfigNZPId-r11")]
    pub csi_rs_cfg_nzp_id_r11: u8,
    #[serde(rename = "antennaPortsCount-r11")]
    pub ant_ports_count_r11: AntPortsCountR11,
    #[serde(rename = "resourceConfig-r11")]
    pub res_cfg_r11: u8,
    #[serde(rename = "subframeConfig-r11")]
    pub sf_cfg_r11: u8,
    #[serde(rename = "scramblingIdentity-r11")]
    pub scrambling_id_r11: u16,
    #[serde(
        rename = "qcl-CRS-Info-r11",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub qcl_crs_info_r11: Option<QclCrsInfoR11>,
    // group 0
    #[serde(
        rename = "csi-RS-ConfigNZPId-v1310",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub csi_rs_cfg_nzp_id_v1310: Option<u8>,
    // group 1
    #[serde(
        rename = "transmissionComb-r14",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub tx_comb_r14: Option<u8>,
    #[serde(
        rename = "frequencyDensity-r14",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub freq_density_r14: Option<FreqDensityR14>,
}

impl Default for CsiRsCfgNzpR11 {
    fn default() -> Self {
        Self {
            csi_rs_cfg_nzp_id_r11: 1,
            ant_ports_count_r11: AntPortsCountR11::default(),
            res_cfg_r11: 0,
            sf_cfg_r11: 0,
            scrambling_id_r11: 0,
            qcl_crs_info_r11: None,
            csi_rs_cfg_nzp_id_v1310: None,
            tx_comb_r14: None,
            freq_density_r14: None,
        }
    }
}

impl CsiRsCfgNzpR11 {
    /// ASN.1 type name.
    pub const NAME: &'static str = "csi_rs_cfg_nzp_r11_s";
    /// Number of extension groups this codec knows.
    pub const NOF_EXT_GROUPS: usize = 2;

    fn ext_groups(&self) -> ExtGroupsPacker {
        let mut groups = ExtGroupsPacker::new();
        groups.set(0, self.csi_rs_cfg_nzp_id_v1310.is_some());
        groups.set(1, self.tx_comb_r14.is_some());
        groups.set(1, self.freq_density_r14.is_some());
        groups
    }

    fn has_ext(&self) -> bool {
        self.csi_rs_cfg_nzp_id_v1310.is_some()
            || self.tx_comb_r14.is_some()
            || self.freq_density_r14.is_some()
    }
}

impl PerEncode for CsiRsCfgNzpR11 {
    fn pack(&self, w: &mut BitWriter) -> CoreResult<()> {
        let aligned = w.aligned();
        let ext = self.has_ext();
        w.write_bool(ext)?;
        w.write_bool(self.qcl_crs_info_r11.is_some())?;

        pack_integer(w, self.csi_rs_cfg_nzp_id_r11, 1u8, 3u8, false, aligned)?;
        self.ant_ports_count_r11.pack(w)?;
        pack_integer(w, self.res_cfg_r11, 0u8, 31u8, false, aligned)?;
        pack_integer(w, self.sf_cfg_r11, 0u8, 154u8, false, aligned)?;
        pack_integer(w, self.scrambling_id_r11, 0u16, 503u16, false, aligned)?;
        if let Some(qcl) = &self.qcl_crs_info_r11 {
            qcl.pack(w)?;
        }

        if ext {
            let groups = self.ext_groups();
            groups.pack(w)?;
            if groups.get(0) {
                pack_open_field(w, aligned, |w| {
                    w.write_bool(self.csi_rs_cfg_nzp_id_v1310.is_some())?;
                    if let Some(id) = self.csi_rs_cfg_nzp_id_v1310 {
                        pack_integer(w, id, 4u8, 24u8, false, aligned)?;
                    }
                    Ok(())
                })?;
            }
            if groups.get(1) {
                pack_open_field(w, aligned, |w| {
                    w.write_bool(self.tx_comb_r14.is_some())?;
                    w.write_bool(self.freq_density_r14.is_some())?;
                    if let Some(comb) = self.tx_comb_r14 {
                        pack_integer(w, comb, 0u8, 2u8, false, aligned)?;
                    }
                    if let Some(density) = &self.freq_density_r14 {
                        density.pack(w)?;
                    }
                    Ok(())
                })?;
            }
        }
        Ok(())
    }
}

impl PerDecode for CsiRsCfgNzpR11 {
    fn unpack(r: &mut BitCursor<'_>) -> CoreResult<Self> {
        let aligned = r.aligned();
        let ext = r.read_bool()?;
        let qcl_present = r.read_bool()?;

        let mut value = Self {
            csi_rs_cfg_nzp_id_r11: unpack_integer(r, 1u8, 3u8, false, aligned)?,
            ant_ports_count_r11: AntPortsCountR11::unpack(r)?,
            res_cfg_r11: unpack_integer(r, 0u8, 31u8, false, aligned)?,
            sf_cfg_r11: unpack_integer(r, 0u8, 154u8, false, aligned)?,
            scrambling_id_r11: unpack_integer(r, 0u16, 503u16, false, aligned)?,
            ..Self::default()
        };
        if qcl_present {
            value.qcl_crs_info_r11 = Some(QclCrsInfoR11::unpack(r)?);
        }

        if ext {
            let mut groups = ExtGroupsUnpacker::new(Self::NOF_EXT_GROUPS);
            groups.unpack(r)?;
            if groups.is_present(0) {
                value.csi_rs_cfg_nzp_id_v1310 = unpack_open_field(r, aligned, |r| {
                    if r.read_bool()? {
                        Ok(Some(unpack_integer(r, 4u8, 24u8, false, aligned)?))
                    } else {
                        Ok(None)
                    }
                })?;
            }
            if groups.is_present(1) {
                let (comb, density) = unpack_open_field(r, aligned, |r| {
                    let comb_present = r.read_bool()?;
                    let density_present = r.read_bool()?;
                    let comb = if comb_present {
                        Some(unpack_integer(r, 0u8, 2u8, false, aligned)?)
                    } else {
                        None
                    };
                    let density = if density_present {
                        Some(FreqDensityR14::unpack(r)?)
                    } else {
                        None
                    };
                    Ok((comb, density))
                })?;
                value.tx_comb_r14 = comb;
                value.freq_density_r14 = density;
            }
            groups.skip_unknown(r)?;
        }
        Ok(value)
    }
}

impl ToJson for CsiRsCfgNzpR11 {
    fn to_json(&self, j: &mut JsonWriter) {
        j.start_obj();
        j.write_int("csi-RS-ConfigNZPId-r11", self.csi_rs_cfg_nzp_id_r11);
        j.write_str("antennaPortsCount-r11", self.ant_ports_count_r11.to_str());
        j.write_int("resourceConfig-r11", self.res_cfg_r11);
        j.write_int("subframeConfig-r11", self.sf_cfg_r11);
        j.write_int("scramblingIdentity-r11", self.scrambling_id_r11);
        if let Some(qcl) = &self.qcl_crs_info_r11 {
            j.write_fieldname("qcl-CRS-Info-r11");
            qcl.to_json(j);
        }
        if let Some(id) = self.csi_rs_cfg_nzp_id_v1310 {
            j.write_int("csi-RS-ConfigNZPId-v1310", id);
        }
        if let Some(comb) = self.tx_comb_r14 {
            j.write_int("transmissionComb-r14", comb);
        }
        if let Some(density) = &self.freq_density_r14 {
            j.write_str("frequencyDensity-r14", density.to_str());
        }
        j.end_obj();
    }
}
