//! Console listing of a harvest

use crate::extract::GpuRecord;
use crate::output::aggregate::ResultSet;
use crate::sites::Site;
use std::fmt::Write;

/// Renders both ranked lists as plain text
pub fn format_results(results: &ResultSet) -> String {
    let mut out = String::new();

    if results.is_empty() {
        out.push_str("No listings found for this GPU, try again later.\n");
        return out;
    }

    out.push_str("In stock GPUs (see website conditions on stock availability):\n");
    for (index, record) in results.top_in_stock().iter().enumerate() {
        let _ = writeln!(out, "No {}: {}", index + 1, format_record(record, false));
    }
    if results.in_stock.is_empty() {
        out.push_str("  none\n");
    }

    out.push_str("\nAll GPUs:\n");
    for (index, record) in results.top_all().iter().enumerate() {
        let _ = writeln!(out, "No {}: {}", index + 1, format_record(record, true));
    }

    out
}

/// Prints both ranked lists to stdout
pub fn print_results(results: &ResultSet) {
    println!();
    print!("{}", format_results(results));
}

fn format_record(record: &GpuRecord, with_stock: bool) -> String {
    let ti = if record.is_variant_ti { " Ti" } else { "" };
    let store = Site::classify(&record.link)
        .map(|site| site.name())
        .unwrap_or("link");

    let mut line = format!(
        "{}, {}{}, {} {}",
        record.price, record.capacity, ti, store, record.link
    );
    if with_stock {
        let _ = write!(line, ", {}", record.stock_status);
    }
    if record.condition != "New" {
        let _ = write!(line, ", {}", record.condition);
    }
    line
}
