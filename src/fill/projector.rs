//! Projection of a form record onto a field index.
//!
//! `project` is a pure function: same record and same table always yield
//! the same ordered write list. Field names that the template does not
//! carry are collected instead of aborting, so one bad field name still
//! leaves a diagnosable, mostly filled form.

use super::fields::{
    indexed, CREW_BASES, CREW_ROW_CAPACITY, FLIGHT_BASES, FLIGHT_ROW_CAPACITY, HEADER_FIELDS,
};
use crate::document::FieldWrite;
use crate::index::IndexTable;
use crate::record::{CrewMember, FlightLeg, FormRecord};

/// Ordered writes plus every field name that failed to resolve.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Projection {
    pub writes: Vec<FieldWrite>,
    pub missing: Vec<String>,
}

impl Projection {
    fn resolve(&mut self, table: &IndexTable, name: String, value: &str) {
        match table.get(&name) {
            Some(location) => self.writes.push(FieldWrite {
                name,
                location,
                value: value.to_string(),
            }),
            None => self.missing.push(name),
        }
    }

    fn resolve_row(&mut self, table: &IndexTable, base: &str, row: usize, value: &str) {
        self.resolve(table, indexed(base, row), value);
    }
}

fn header_values(record: &FormRecord) -> [&str; 7] {
    [
        &record.date,
        &record.mds,
        &record.serial_number,
        &record.unit_charged,
        &record.harm_location,
        &record.flight_auth_number,
        &record.issuing_unit,
    ]
}

fn flight_values(leg: &FlightLeg) -> [&str; 12] {
    [
        &leg.mission_number,
        &leg.mission_symbol,
        &leg.from_icao,
        &leg.to_icao,
        &leg.take_off_time,
        &leg.land_time,
        &leg.total_time,
        &leg.touch_and_go,
        &leg.full_stop,
        &leg.total_landings,
        &leg.sorties,
        &leg.special_use,
    ]
}

// absent optional categories are written as empty text, never omitted
fn text(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

fn crew_values(crew: &CrewMember) -> [&str; 19] {
    [
        &crew.organization,
        &crew.ssan_last4,
        &crew.last_name,
        &crew.duty_code,
        text(&crew.primary),
        text(&crew.secondary),
        text(&crew.instructor),
        text(&crew.evaluator),
        text(&crew.other),
        text(&crew.total_time),
        text(&crew.sorties),
        text(&crew.night),
        text(&crew.instrument),
        text(&crew.sim_instrument),
        text(&crew.nvg),
        text(&crew.combat_time),
        text(&crew.combat_sorties),
        text(&crew.combat_support_time),
        text(&crew.resv_status),
    ]
}

/// Compute every write for `record` against the built table.
///
/// Order is fixed: header block, then flight rows, then crew rows, each
/// row in base-name order. Rows past the section capacity produce nothing.
pub fn project(record: &FormRecord, table: &IndexTable) -> Projection {
    let mut projection = Projection::default();

    for (name, value) in HEADER_FIELDS.into_iter().zip(header_values(record)) {
        projection.resolve(table, name.to_string(), value);
    }

    for (row, leg) in record.flights.iter().take(FLIGHT_ROW_CAPACITY).enumerate() {
        for (base, value) in FLIGHT_BASES.into_iter().zip(flight_values(leg)) {
            projection.resolve_row(table, base, row, value);
        }
    }

    for (row, crew) in record
        .crew_members
        .iter()
        .take(CREW_ROW_CAPACITY)
        .enumerate()
    {
        // Back-page rows keep the unshifted global row number in their
        // suffix; the page itself comes from the indexed location.
        for (base, value) in CREW_BASES.into_iter().zip(crew_values(crew)) {
            projection.resolve_row(table, base, row, value);
        }
    }

    projection
}
