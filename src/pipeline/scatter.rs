use crate::listing::VehicleRow;
use crate::pipeline::types::ScatterPoint;

/// Odometer against model year for every row that has both, in table order.
pub fn odometer_by_year(rows: &[VehicleRow]) -> Vec<ScatterPoint> {
    rows.iter()
        .filter_map(|row| {
            let (Some(model_year), Some(odometer)) = (row.model_year, row.odometer) else {
                return None;
            };
            Some(ScatterPoint {
                model_year,
                odometer,
                condition: row.condition.clone(),
            })
        })
        .collect()
}
