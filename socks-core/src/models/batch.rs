use super::{ItemData, StockFailure};
use serde::{Deserialize, Serialize};
use std::io::Read;

/// One row of a CSV batch, before validation.
///
/// The header row must name the columns `color`, `cottonPercentage` and
/// `quantity`; other columns are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRow {
    /// The color of the socks
    pub color: String,
    /// The cotton content, in percent
    pub cotton_percentage: f64,
    /// The number of pairs
    pub quantity: u32,
}

impl From<BatchRow> for ItemData {
    fn from(row: BatchRow) -> Self {
        Self {
            color: row.color,
            cotton_percentage: row.cotton_percentage,
            quantity: row.quantity,
        }
    }
}

/// Read a comma-delimited batch with a mandatory header row.
///
/// The batch is all-or-nothing: the first row that cannot be parsed, or that
/// fails [`ItemData::validate`], rejects the whole batch.
pub fn read_batch<R: Read>(reader: R) -> Result<Vec<ItemData>, StockFailure> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b',')
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<BatchRow>().enumerate() {
        // the header is line 1
        let line = index + 2;
        let data = ItemData::from(
            record.map_err(|err| StockFailure::InvalidCsvFile(format!("line {line}: {err}")))?,
        );
        data.validate()
            .map_err(|err| StockFailure::InvalidCsvFile(format!("line {line}: {err}")))?;
        rows.push(data);
    }

    Ok(rows)
}

/// The effect of an imported batch.
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    /// Rows merged into an existing item
    pub updated: usize,
    /// Rows stored as new items
    pub created: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_batch() {
        let csv = "color,cottonPercentage,quantity\nwhite,33.5,10\nblack, 80 ,4\n";
        let rows = read_batch(csv.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![
                ItemData {
                    color: "white".to_owned(),
                    cotton_percentage: 33.5,
                    quantity: 10
                },
                ItemData {
                    color: "black".to_owned(),
                    cotton_percentage: 80.0,
                    quantity: 4
                },
            ]
        );
    }

    #[test]
    fn test_column_order_is_free() {
        let csv = "quantity,color,cottonPercentage,note\n3,red,50,spare\n";
        let rows = read_batch(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].color, "red");
        assert_eq!(rows[0].quantity, 3);
    }

    #[test]
    fn test_header_only() {
        let rows = read_batch("color,cottonPercentage,quantity\n".as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_non_numeric_quantity() {
        let csv = "color,cottonPercentage,quantity\nwhite,33.5,10\nblack,80,many\n";
        match read_batch(csv.as_bytes()) {
            Err(StockFailure::InvalidCsvFile(message)) => assert!(message.starts_with("line 3")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_missing_column() {
        let csv = "color,quantity\nwhite,10\n";
        assert!(matches!(
            read_batch(csv.as_bytes()),
            Err(StockFailure::InvalidCsvFile(_))
        ));
    }

    #[test]
    fn test_ragged_row() {
        let csv = "color,cottonPercentage,quantity\nwhite,33.5\n";
        assert!(matches!(
            read_batch(csv.as_bytes()),
            Err(StockFailure::InvalidCsvFile(_))
        ));
    }

    #[test]
    fn test_negative_quantity() {
        let csv = "color,cottonPercentage,quantity\nwhite,33.5,-1\n";
        assert!(matches!(
            read_batch(csv.as_bytes()),
            Err(StockFailure::InvalidCsvFile(_))
        ));
    }

    #[rstest::rstest]
    #[case("white,NaN,1")]
    #[case("white,150,10")]
    #[case("white,0,10")]
    #[case("red,50,0")]
    fn test_out_of_range_row(#[case] row: &str) {
        let csv = format!("color,cottonPercentage,quantity\nblack,80,4\n{row}\n");
        match read_batch(csv.as_bytes()) {
            Err(StockFailure::InvalidCsvFile(message)) => assert!(message.starts_with("line 3")),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
