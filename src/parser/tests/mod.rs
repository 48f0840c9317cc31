//! Scenario tests for the MRZ parsing pipeline
//!
//! Fixtures are the ICAO 9303 specimen documents for the fictional state of
//! Utopia (`UTO`), one per supported layout.


/// ICAO 9303 part 4 passport specimen
pub const TD3_LINES: [&str; 2] = [
    "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
    "L898902C36UTO7408122F1204159ZE184226B<<<<<10",
];

/// TD3 specimen without a personal number, check digit left as filler
pub const TD3_NO_PERSONAL_NUMBER: [&str; 2] = [
    "P<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
    "L898902C36UTO7408122F1204159<<<<<<<<<<<<<<<8",
];

/// ICAO 9303 part 5 ID card specimen
pub const TD1_LINES: [&str; 3] = [
    "I<UTOD231458907<<<<<<<<<<<<<<<",
    "7408122F1204159UTO<<<<<<<<<<<6",
    "ERIKSSON<<ANNA<MARIA<<<<<<<<<<",
];

/// ICAO 9303 part 6 ID card specimen
pub const TD2_LINES: [&str; 2] = [
    "I<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
    "D231458907UTO7408122F1204159<<<<<<<6",
];

/// ICAO 9303 part 7 visa specimens
pub const MRVA_LINES: [&str; 2] = [
    "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<<<<<<<<<",
    "L8988901C4XXX4009078F96121096ZE184226B<<<<<<",
];

pub const MRVB_LINES: [&str; 2] = [
    "V<UTOERIKSSON<<ANNA<MARIA<<<<<<<<<<<",
    "L8988901C4XXX4009078F9612109<<<<<<<<",
];

/// Join fixture lines into one newline-separated block
pub fn block(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Replace the character at `column` of line `line`
pub fn with_char(lines: &[&str], line: usize, column: usize, replacement: char) -> String {
    let mut owned: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
    owned[line] = owned[line]
        .chars()
        .enumerate()
        .map(|(i, c)| if i == column { replacement } else { c })
        .collect();
    owned.join("\n")
}
