use crate::error::{RfResult, RosterError};
use crate::roster::types::RawRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Reads `player,alliance,server,power` rows (header required).
pub fn read_csv<R: Read>(reader: R) -> RfResult<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let rec: RawRecord = result?;
        rows.push(rec);
    }

    debug!("Parsed {} CSV roster rows", rows.len());
    Ok(rows)
}

/// Reads a JSON array of `{player, alliance, server, power}` objects.
pub fn read_json<R: Read>(reader: R) -> RfResult<Vec<RawRecord>> {
    let rows: Vec<RawRecord> = serde_json::from_reader(BufReader::new(reader))?;
    debug!("Parsed {} JSON roster rows", rows.len());
    Ok(rows)
}

/// Picks the parser from the file extension.
pub fn load_path<P: AsRef<Path>>(path: P) -> RfResult<Vec<RawRecord>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    info!("📂 Reading roster from {:?}", path);

    match ext.as_str() {
        "csv" => read_csv(File::open(path)?),
        "json" => read_json(File::open(path)?),
        _ => Err(RosterError::UnsupportedFormat(path.display().to_string())),
    }
}
