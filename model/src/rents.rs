use anyhow::Result;
use serde::Deserialize;

/// One listing from the rent survey. Flags arrive as 0/1 in the CSV and
/// become real bools here.
#[derive(Clone, Debug, PartialEq)]
pub struct RentRecord {
    pub newly_constructed: bool,
    pub balcony: bool,
    pub lift: bool,
    pub garden: bool,
    pub service_charge: f64,
    pub living_space: f64,
    pub rooms: f64,
    pub postal_code: String,
    pub total_rent: f64,
}

/// The full rent dataset, scanned per query. No indexing; the survey is a few
/// thousand rows.
pub struct RentTable {
    rows: Vec<RentRecord>,
}

impl RentTable {
    pub fn empty() -> RentTable {
        RentTable { rows: Vec::new() }
    }

    pub fn new(rows: Vec<RentRecord>) -> RentTable {
        RentTable { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[RentRecord] {
        &self.rows
    }

    /// The mean total rent over rows matching the query on every field. All
    /// eight fields must line up; near misses count for nothing.
    pub fn estimate(&self, query: &RentQuery) -> RentEstimate {
        let mut sum = 0.0;
        let mut count = 0;
        for row in &self.rows {
            if query.matches(row) {
                sum += row.total_rent;
                count += 1;
            }
        }
        if count == 0 {
            RentEstimate::NoMatch
        } else {
            RentEstimate::Average(sum / count as f64)
        }
    }
}

/// What the calculator form submits. Same fields as a record, minus the rent
/// itself.
#[derive(Clone, Debug, PartialEq)]
pub struct RentQuery {
    pub newly_constructed: bool,
    pub balcony: bool,
    pub lift: bool,
    pub garden: bool,
    pub service_charge: f64,
    pub living_space: f64,
    pub rooms: f64,
    pub postal_code: String,
}

impl RentQuery {
    fn matches(&self, row: &RentRecord) -> bool {
        // Numeric comparisons are exact; the form quantizes the same way the
        // survey does.
        self.newly_constructed == row.newly_constructed
            && self.balcony == row.balcony
            && self.lift == row.lift
            && self.garden == row.garden
            && self.service_charge == row.service_charge
            && self.living_space == row.living_space
            && self.rooms == row.rooms
            && self.postal_code.trim() == row.postal_code.trim()
    }

    /// Parses the CLI's comma-separated form, in CSV column order:
    /// newlyConst,balcony,lift,garden,serviceCharge,livingSpace,noRooms,postalCode
    pub fn parse(raw: &str) -> Result<RentQuery> {
        let fields: Vec<&str> = raw.split(',').map(|x| x.trim()).collect();
        if fields.len() != 8 {
            bail!("Expected 8 comma-separated fields, got {}", fields.len());
        }
        Ok(RentQuery {
            newly_constructed: parse_flag(fields[0])?,
            balcony: parse_flag(fields[1])?,
            lift: parse_flag(fields[2])?,
            garden: parse_flag(fields[3])?,
            service_charge: parse_number(fields[4])?,
            living_space: parse_number(fields[5])?,
            rooms: parse_number(fields[6])?,
            postal_code: fields[7].to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RentEstimate {
    Average(f64),
    /// No row matched. Distinct from an average of 0, which would be a
    /// suspiciously good deal.
    NoMatch,
}

fn parse_flag(x: &str) -> Result<bool> {
    match x {
        "0" | "false" | "no" => Ok(false),
        "1" | "true" | "yes" => Ok(true),
        _ => bail!("Can't interpret {:?} as a yes/no flag", x),
    }
}

fn parse_number(x: &str) -> Result<f64> {
    let parsed: f64 = x
        .parse()
        .map_err(|_| anyhow!("Can't interpret {:?} as a number", x))?;
    Ok(parsed)
}

pub fn load<R: std::io::Read>(reader: R) -> Result<RentTable> {
    let mut rows = Vec::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Record = rec?;
        rows.push(RentRecord {
            newly_constructed: rec.newly_const != 0,
            balcony: rec.balcony != 0,
            lift: rec.lift != 0,
            garden: rec.garden != 0,
            service_charge: rec.service_charge,
            living_space: rec.living_space,
            rooms: rec.no_rooms,
            postal_code: rec.postal_code.trim().to_string(),
            total_rent: rec.total_rent,
        });
    }
    info!("Loaded {} rent listings", rows.len());
    Ok(RentTable::new(rows))
}

#[derive(Deserialize)]
struct Record {
    #[serde(rename = "newlyConst")]
    newly_const: u8,
    balcony: u8,
    lift: u8,
    garden: u8,
    #[serde(rename = "serviceCharge")]
    service_charge: f64,
    #[serde(rename = "livingSpace")]
    living_space: f64,
    #[serde(rename = "noRooms")]
    no_rooms: f64,
    postal_code: String,
    #[serde(rename = "totalRent")]
    total_rent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(postal_code: &str, living_space: f64, total_rent: f64) -> RentRecord {
        RentRecord {
            newly_constructed: false,
            balcony: true,
            lift: false,
            garden: false,
            service_charge: 150.0,
            living_space,
            rooms: 2.0,
            postal_code: postal_code.to_string(),
            total_rent,
        }
    }

    fn query(postal_code: &str, living_space: f64) -> RentQuery {
        RentQuery {
            newly_constructed: false,
            balcony: true,
            lift: false,
            garden: false,
            service_charge: 150.0,
            living_space,
            rooms: 2.0,
            postal_code: postal_code.to_string(),
        }
    }

    #[test]
    fn test_estimate_averages_exact_matches_only() {
        let table = RentTable::new(vec![
            record("80331", 60.0, 900.0),
            record("80331", 60.0, 1100.0),
            record("80331", 65.0, 2000.0),
        ]);
        assert_eq!(
            table.estimate(&query("80331", 60.0)),
            RentEstimate::Average(1000.0)
        );
    }

    #[test]
    fn test_estimate_with_no_matches() {
        let table = RentTable::new(vec![record("80331", 60.0, 900.0)]);
        assert_eq!(
            table.estimate(&query("80331", 61.0)),
            RentEstimate::NoMatch
        );
        assert_eq!(
            table.estimate(&query("81541", 60.0)),
            RentEstimate::NoMatch
        );
        assert_eq!(
            RentTable::empty().estimate(&query("80331", 60.0)),
            RentEstimate::NoMatch
        );
    }

    #[test]
    fn test_one_flipped_flag_disqualifies() {
        let table = RentTable::new(vec![record("80331", 60.0, 900.0)]);
        let mut q = query("80331", 60.0);
        q.balcony = false;
        assert_eq!(table.estimate(&q), RentEstimate::NoMatch);
    }

    #[test]
    fn test_postal_codes_compare_trimmed() {
        let table = RentTable::new(vec![record("80331", 60.0, 900.0)]);
        let q = query(" 80331 ", 60.0);
        assert_eq!(table.estimate(&q), RentEstimate::Average(900.0));
    }

    #[test]
    fn test_load_from_csv() {
        let data = "\
newlyConst,balcony,lift,garden,serviceCharge,livingSpace,noRooms,postal_code,totalRent
0,1,0,0,150,60,2,80331,900
0,1,0,0,150,60,2,80331,1100
1,0,1,0,200,85.5,3,80799,1850.5
";
        let table = load(data.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.estimate(&query("80331", 60.0)),
            RentEstimate::Average(1000.0)
        );
        let third = &table.rows()[2];
        assert!(third.newly_constructed);
        assert!(third.lift);
        assert!(!third.balcony);
        assert_eq!(third.living_space, 85.5);
        assert_eq!(third.total_rent, 1850.5);
    }

    #[test]
    fn test_load_rejects_malformed_rows() {
        let data = "\
newlyConst,balcony,lift,garden,serviceCharge,livingSpace,noRooms,postal_code,totalRent
0,1,0,0,lots,60,2,80331,900
";
        assert!(load(data.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_query_string() {
        let q = RentQuery::parse("0,1,0,0,150,60,2,80331").unwrap();
        assert_eq!(q, query("80331", 60.0));
        assert!(RentQuery::parse("0,1,0").is_err());
        assert!(RentQuery::parse("2,1,0,0,150,60,2,80331").is_err());
        assert!(RentQuery::parse("0,1,0,0,abc,60,2,80331").is_err());
    }
}
