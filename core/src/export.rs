//! One-time CSV export of a generated dataset.
//!
//! Quoting is left to the `csv` writer. Optional columns are written only
//! when at least one record carries them.

use crate::{
    error::DashResult,
    record::{SalePeriod, SalesRecord},
};
use std::{
    borrow::Cow,
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    RecordId,
    CustomerName,
    State,
    Email,
    ProductCategory,
    ProductName,
    Period,
    Quantity,
    Price,
    WarrantyStart,
    WarrantyEnd,
    ServiceType,
    Sector,
}

impl Column {
    fn header(&self, dated: bool) -> &'static str {
        match self {
            Self::RecordId        => "Record ID",
            Self::CustomerName    => "Customer Name",
            Self::State           => "State",
            Self::Email           => "Email",
            Self::ProductCategory => "Product Category",
            Self::ProductName     => "Product Name",
            Self::Period if dated => "Purchase Date",
            Self::Period          => "Year",
            Self::Quantity        => "ASUs",
            Self::Price           => "Price",
            Self::WarrantyStart   => "Warranty Start",
            Self::WarrantyEnd     => "Warranty End",
            Self::ServiceType     => "Service Type",
            Self::Sector          => "Sector",
        }
    }

    fn value<'r>(&self, r: &'r SalesRecord) -> Cow<'r, str> {
        match self {
            Self::RecordId        => Cow::Borrowed(r.record_id.as_str()),
            Self::CustomerName    => opt(r.customer.as_ref().map(|c| c.company.as_str())),
            Self::State           => Cow::Borrowed(r.state.as_str()),
            Self::Email           => opt(r.customer.as_ref().map(|c| c.email.as_str())),
            Self::ProductCategory => Cow::Borrowed(r.product_category.as_str()),
            Self::ProductName     => Cow::Borrowed(r.product_name.as_str()),
            Self::Period => match r.period {
                SalePeriod::Year(y) => Cow::Owned(y.to_string()),
                SalePeriod::Date(d) => Cow::Owned(d.format("%Y-%m-%d").to_string()),
            },
            Self::Quantity        => Cow::Owned(r.quantity.map(|q| q.to_string()).unwrap_or_default()),
            Self::Price           => Cow::Owned(format!("{:.2}", r.price)),
            Self::WarrantyStart   => Cow::Owned(r.warranty.map(|w| w.start.to_string()).unwrap_or_default()),
            Self::WarrantyEnd     => Cow::Owned(r.warranty.map(|w| w.end.to_string()).unwrap_or_default()),
            Self::ServiceType     => opt(r.service_type.as_deref()),
            Self::Sector          => Cow::Borrowed(r.sector.label()),
        }
    }
}

fn opt(value: Option<&str>) -> Cow<'_, str> {
    Cow::Borrowed(value.unwrap_or(""))
}

fn columns_for(records: &[SalesRecord]) -> Vec<Column> {
    let has_customer = records.iter().any(|r| r.customer.is_some());
    let has_quantity = records.iter().any(|r| r.quantity.is_some());
    let has_warranty = records.iter().any(|r| r.warranty.is_some());
    let has_service = records.iter().any(|r| r.service_type.is_some());

    let mut cols = vec![Column::RecordId];
    if has_customer {
        cols.push(Column::CustomerName);
    }
    cols.push(Column::State);
    if has_customer {
        cols.push(Column::Email);
    }
    cols.extend([Column::ProductCategory, Column::ProductName, Column::Period]);
    if has_quantity {
        cols.push(Column::Quantity);
    }
    cols.push(Column::Price);
    if has_warranty {
        cols.extend([Column::WarrantyStart, Column::WarrantyEnd]);
    }
    if has_service {
        cols.push(Column::ServiceType);
    }
    cols.push(Column::Sector);
    cols
}

/// Write header plus one line per record. Returns the number of data rows.
pub fn write_csv<W: Write>(records: &[SalesRecord], out: &mut W) -> DashResult<usize> {
    let dated = records.iter().any(|r| matches!(r.period, SalePeriod::Date(_)));
    let cols = columns_for(records);
    let mut writer = csv::Writer::from_writer(out);

    writer.write_record(cols.iter().map(|c| c.header(dated)))?;
    for r in records {
        let row: Vec<Cow<'_, str>> = cols.iter().map(|c| c.value(r)).collect();
        writer.write_record(row.iter().map(|cell| cell.as_bytes()))?;
    }
    writer.flush()?;
    Ok(records.len())
}

pub fn write_csv_file(records: &[SalesRecord], path: impl AsRef<Path>) -> DashResult<usize> {
    let path = path.as_ref();
    let mut out = BufWriter::new(File::create(path)?);
    let rows = write_csv(records, &mut out)?;
    out.flush()?;
    log::info!("exported {rows} records to {}", path.display());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_dataset_writes_header_only() {
        let mut buf = Vec::new();
        let rows = write_csv(&[], &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(text, "Record ID,State,Product Category,Product Name,Year,Price,Sector\n");
    }
}
