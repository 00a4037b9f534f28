use crate::domain::model::Group;
use crate::utils::error::{HrError, Result};
use chrono::NaiveDate;
use csv::{QuoteStyle, Terminator, WriterBuilder};

/// UTF-8 BOM，讓試算表軟體正確辨識中文
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const DEFAULT_HEADER: [&str; 2] = ["組別", "姓名"];

/// Serializes groups as `group,name` rows behind a UTF-8 BOM.
///
/// Fields are written unquoted and rows are joined by `\n` with no trailing
/// newline, so a name containing a comma produces an extra column.
pub fn groups_to_csv<S: AsRef<str>>(groups: &[Group], header: &[S]) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .flexible(true)
        .from_writer(Vec::new());

    writer.write_record(header.iter().map(|h| h.as_ref()))?;
    for group in groups {
        for member in &group.members {
            writer.write_record([group.name.as_str(), member.name.as_str()])?;
        }
    }

    let mut body = writer.into_inner().map_err(|e| {
        HrError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    if body.last() == Some(&b'\n') {
        body.pop();
    }

    let mut bytes = Vec::with_capacity(UTF8_BOM.len() + body.len());
    bytes.extend_from_slice(UTF8_BOM);
    bytes.extend_from_slice(&body);

    tracing::debug!("Serialized {} groups into {} bytes", groups.len(), bytes.len());
    Ok(bytes)
}

/// `分組結果_2026-10-19.csv`
pub fn export_filename(prefix: &str, date: NaiveDate, date_format: &str) -> String {
    format!("{}_{}.csv", prefix, date.format(date_format))
}
