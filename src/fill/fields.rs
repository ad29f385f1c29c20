//! The template's field-name contract.
//!
//! Every field name the filler resolves is derived here, so a template
//! schema change means editing this module and nothing else. Repeated rows
//! use suffixed names: row `i` of a row-group maps to `{base}_{i}`, and the
//! back page keeps the global row numbering (crew row 16 is `last_name_15`
//! on page 1, not `last_name_0`).

/// Header fields, one write each.
pub const HEADER_FIELDS: [&str; 7] = [
    "date",
    "mds",
    "serial",
    "unit_charged",
    "harm_location",
    "flight_auth",
    "issuing_unit",
];

/// Per-row base names for the flight-data section.
pub const FLIGHT_BASES: [&str; 12] = [
    "mission_number",
    "mission_symbol",
    "from_icao",
    "to_icao",
    "take_off_time",
    "land_time",
    "total_time",
    "touch_go",
    "full_stop",
    "total",
    "sorties",
    "special_use",
];

/// Per-row base names for the crew-member section.
pub const CREW_BASES: [&str; 19] = [
    "organization",
    "ssan",
    "last_name",
    "flight_auth",
    "ft_prim",
    "ft_sec",
    "ft_instr",
    "ft_eval",
    "ft_other",
    "ft_total_time",
    "ft_total_srty",
    "fc_night",
    "fc_ins",
    "fc_sim_ins",
    "fc_nvg",
    "fc_combat_time",
    "fc_combat_srty",
    "fc_combat_spt_time",
    "resv_status",
];

/// The flight section holds six rows, front page only. Extra legs are a
/// documented capacity limit, not an error.
pub const FLIGHT_ROW_CAPACITY: usize = 6;

/// Crew rows on the front page.
pub const FRONT_PAGE_CREW_ROWS: usize = 15;

/// Crew rows across both pages. Rows past this are dropped.
pub const CREW_ROW_CAPACITY: usize = 35;

/// Field name for row `row` of a row-group.
pub fn indexed(base: &str, row: usize) -> String {
    format!("{base}_{row}")
}

/// Which page a crew row belongs to.
pub fn crew_page(row: usize) -> usize {
    usize::from(row >= FRONT_PAGE_CREW_ROWS)
}
