use super::model::{columns, CellValue, Dataset};

// ---------------------------------------------------------------------------
// Derived metric: interactions per 1000 followers
// ---------------------------------------------------------------------------

/// Populate `Interacciones por 1000 seguidores` on every record.
///
/// Formula: `Interacciones / Seguidores * 1000`.  The result is missing when
/// followers is zero or missing, or interactions is missing — never infinity
/// and never NaN.  Runs after [`coerce_numeric`](super::coerce::coerce_numeric)
/// so both operands already have numeric semantics.
pub fn add_interactions_per_1000(dataset: &mut Dataset) {
    for rec in &mut dataset.records {
        let value = match (
            rec.metric(columns::INTERACTIONS),
            rec.metric(columns::FOLLOWERS),
        ) {
            (Some(interactions), Some(followers)) if followers != 0.0 => {
                CellValue::Number(interactions / followers * 1000.0)
            }
            _ => CellValue::Missing,
        };
        rec.metrics
            .insert(columns::INTERACTIONS_PER_1000.to_string(), value);
    }
    dataset.add_column(columns::INTERACTIONS_PER_1000);
}
