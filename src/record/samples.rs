//! Canned form records for demos and tests.
//!
//! `normal_record` is a typical short mission day; `full_record` saturates
//! every row the template can hold, including the back-page overflow.

use chrono::Local;

use super::model::{CrewMember, FlightLeg, FormRecord};

const LAST_NAMES: [&str; 35] = [
    "Anderson",
    "Bernard",
    "Connor",
    "Daniels",
    "Engram",
    "Fredericks",
    "Goddard",
    "Harrison",
    "Ingraham",
    "Jacobson",
    "Kimmel",
    "Lucas",
    "Maryweather",
    "Nelson",
    "Osborne",
    "Pettersen",
    "Quesenberry",
    "Reese",
    "Stein",
    "Truman",
    "Underwood",
    "Victoria",
    "Wetherspoon",
    "X",
    "Young",
    "Zellman",
    "Angelos",
    "Barry",
    "Caldera",
    "Davidson",
    "Elfman",
    "Franks",
    "Goodman",
    "Hanks",
    "Ivy",
];

const ICAOS: [&str; 12] = [
    "RJTY", "KLTS", "KO79", "RJSM", "RJTF", "PHIK", "PHHI", "PHDH", "PHNL", "KBOF", "KADW",
    "KCHS",
];

/// Format a date the way the form expects it, e.g. "23 Sep 2020".
pub fn form_date(date: chrono::NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Today's date in form notation.
pub fn today_form_date() -> String {
    form_date(Local::now().date_naive())
}

/// A small record: one local pattern flight, three crew members, front page
/// only.
pub fn normal_record() -> FormRecord {
    FormRecord {
        date: "23 Sep 2020".to_string(),
        mds: "SMC017A".to_string(),
        serial_number: "99-0009".to_string(),
        unit_charged: "437 AW (HQ AMC) / DKFX".to_string(),
        harm_location: "JB Charleston".to_string(),
        flight_auth_number: "20-0539".to_string(),
        issuing_unit: "0016AS".to_string(),
        flights: vec![FlightLeg {
            flight_seq: "a".to_string(),
            mission_number: String::new(),
            mission_symbol: "Q1".to_string(),
            from_icao: "KCHS".to_string(),
            to_icao: "KCHS".to_string(),
            take_off_time: "1800".to_string(),
            land_time: "2100".to_string(),
            total_time: "3.0".to_string(),
            touch_and_go: String::new(),
            full_stop: "4".to_string(),
            total_landings: "4".to_string(),
            sorties: "1".to_string(),
            special_use: String::new(),
        }],
        crew_members: vec![
            CrewMember {
                last_name: "Bertram".to_string(),
                first_name: "Gilfoyle".to_string(),
                ssan_last4: "1234".to_string(),
                duty_code: "IP B5".to_string(),
                organization: "0016".to_string(),
                primary: Some("1.5".to_string()),
                instructor: Some("1.5".to_string()),
                other: Some(String::new()),
                total_time: Some("3.0".to_string()),
                sorties: Some("1".to_string()),
                night: Some("2.0".to_string()),
                instrument: Some(String::new()),
                nvg: Some("2.0".to_string()),
                combat_time: Some(String::new()),
                combat_support_time: Some(String::new()),
                resv_status: Some(String::new()),
                ..CrewMember::default()
            },
            CrewMember {
                last_name: "Chugtai".to_string(),
                first_name: "Dinesh".to_string(),
                ssan_last4: "1345".to_string(),
                duty_code: "IP BJ".to_string(),
                organization: "0016".to_string(),
                primary: Some("1.5".to_string()),
                instructor: Some("1.5".to_string()),
                total_time: Some("3.0".to_string()),
                sorties: Some("1".to_string()),
                night: Some("2.0".to_string()),
                nvg: Some("2.0".to_string()),
                resv_status: Some("1".to_string()),
                ..CrewMember::default()
            },
            CrewMember {
                last_name: "LongLastName".to_string(),
                first_name: "Monica".to_string(),
                ssan_last4: "5322".to_string(),
                duty_code: "IP BZ".to_string(),
                organization: "1234".to_string(),
                primary: Some("1.1".to_string()),
                secondary: Some("2.2".to_string()),
                instructor: Some("3.3".to_string()),
                evaluator: Some("4.4".to_string()),
                other: Some("5.5".to_string()),
                total_time: Some("0.0".to_string()),
                sorties: Some("9".to_string()),
                night: Some("6.6".to_string()),
                instrument: Some("7.7".to_string()),
                sim_instrument: Some("8.8".to_string()),
                nvg: Some("0.0".to_string()),
                combat_time: Some("3.3".to_string()),
                combat_sorties: Some("4.4".to_string()),
                combat_support_time: Some("5.5".to_string()),
                resv_status: Some("33".to_string()),
                ..CrewMember::default()
            },
        ],
        ..FormRecord::default()
    }
}

/// A record that fills every slot: six flight legs and thirty-five crew
/// members, so twenty rows overflow onto the back page.
pub fn full_record() -> FormRecord {
    let mut record = FormRecord {
        date: today_form_date(),
        mds: "SMC019A".to_string(),
        serial_number: "99-1119".to_string(),
        unit_charged: "225 ADS (HQ PACAF) / ALWAYS BLUE".to_string(),
        harm_location: "JB Pearl Harbor - Hickam".to_string(),
        flight_auth_number: "SIM".to_string(),
        issuing_unit: "0016AS".to_string(),
        ..FormRecord::default()
    };

    for i in 0..6 {
        record.flights.push(FlightLeg {
            flight_seq: "a".to_string(),
            mission_number: format!("mn{i}"),
            mission_symbol: format!("Q{i}"),
            from_icao: ICAOS[i].to_string(),
            to_icao: ICAOS[ICAOS.len() - 1 - i].to_string(),
            take_off_time: format!("180{i}"),
            land_time: format!("210{i}"),
            total_time: format!("{:.1}", i as f64),
            touch_and_go: format!("z{i}"),
            full_stop: i.to_string(),
            total_landings: i.to_string(),
            sorties: i.to_string(),
            special_use: i.to_string(),
        });
    }

    for (i, last_name) in LAST_NAMES.iter().enumerate() {
        let t = i as f64;
        // resv_status cycles through 1..4, 33 and blank
        let resv = match i % 6 {
            0 => String::new(),
            5 => "33".to_string(),
            r => r.to_string(),
        };
        record.crew_members.push(CrewMember {
            last_name: last_name.to_string(),
            first_name: "Bill".to_string(),
            ssan_last4: format!("{i:04}"),
            duty_code: format!("DC {i}"),
            organization: "1234".to_string(),
            primary: Some(format!("{:.1}", t + 0.1)),
            secondary: Some(format!("{:.1}", t + 0.2)),
            instructor: Some(format!("{:.1}", t + 0.3)),
            evaluator: Some(format!("{:.1}", t + 0.4)),
            other: Some(format!("{:.1}", t + 0.5)),
            total_time: Some(format!("{:.1}", t + 0.6)),
            sorties: Some(format!("{:.1}", t + 0.7)),
            night: Some(format!("{:.1}", t + 0.8)),
            instrument: Some(format!("{:.1}", t + 0.9)),
            sim_instrument: Some(format!("{:.1}", t + 1.0)),
            nvg: Some(format!("{:.1}", t + 1.1)),
            combat_time: Some(format!("{:.1}", t + 1.2)),
            combat_sorties: Some(format!("{:.1}", t + 1.3)),
            combat_support_time: Some(format!("{:.1}", t + 1.4)),
            resv_status: Some(resv),
        });
    }

    record
}
