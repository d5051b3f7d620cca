use super::model::{MultiValued, Record};

/// Separator between values of a multi-valued field.
pub const SEPARATOR: char = ',';

/// One (record, value) pair produced by exploding a multi-valued field.
///
/// Borrows from the record; the record itself is never modified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandedRow<'a> {
    pub record: &'a Record,
    /// Field the value was taken from.
    pub field: MultiValued,
    pub value: &'a str,
}

/// One (record, first value, second value) triple from exploding two fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairedRow<'a> {
    pub record: &'a Record,
    pub first: &'a str,
    pub second: &'a str,
}

/// Split on [`SEPARATOR`], trim each token and drop the ones left empty.
/// Token order follows the source string.
pub fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Explode `field` into one row per token, in record order then token order.
pub fn expand<'a, I>(records: I, field: MultiValued) -> Vec<ExpandedRow<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    records
        .into_iter()
        .flat_map(|record| {
            split_tokens(record.multi_value(field)).map(move |value| ExpandedRow {
                record,
                field,
                value,
            })
        })
        .collect()
}

/// Explode two fields at once: every token of `first` paired with every
/// token of `second`, per record.
pub fn expand_pair<'a, I>(records: I, first: MultiValued, second: MultiValued) -> Vec<PairedRow<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut rows = Vec::new();
    for record in records {
        for a in split_tokens(record.multi_value(first)) {
            for b in split_tokens(record.multi_value(second)) {
                rows.push(PairedRow {
                    record,
                    first: a,
                    second: b,
                });
            }
        }
    }
    rows
}
