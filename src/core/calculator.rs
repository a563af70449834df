use crate::domain::model::{MaintenanceInput, MaintenanceResult};
use crate::utils::error::{MaintenanceError, Result};

/// Per-flat charges are snapped to multiples of this amount unless configured otherwise.
pub const DEFAULT_ROUNDING_UNIT: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    rounding_unit: u64,
}

impl Calculator {
    pub fn new(rounding_unit: u64) -> Result<Self> {
        if rounding_unit == 0 {
            return Err(MaintenanceError::invalid_input(
                "rounding unit must be greater than 0",
            ));
        }
        Ok(Self { rounding_unit })
    }

    pub fn rounding_unit(&self) -> u64 {
        self.rounding_unit
    }

    pub fn calculate(&self, input: &MaintenanceInput) -> Result<MaintenanceResult> {
        calculate(input, self.rounding_unit)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            rounding_unit: DEFAULT_ROUNDING_UNIT,
        }
    }
}

/// Rounds `total / flats` to the nearest multiple of `unit`, halves rounding up.
///
/// Works in integers, `floor((2 * total + unit * flats) / (2 * unit * flats)) * unit`,
/// so exact halves never fall on the wrong side through float error.
/// Returns `None` when `flats` or `unit` is zero.
pub fn round_to_nearest(total: u64, flats: u32, unit: u64) -> Option<u128> {
    let flats = u128::from(flats);
    let unit = u128::from(unit);
    let denominator = 2 * unit * flats;
    if denominator == 0 {
        return None;
    }
    Some((2 * u128::from(total) + unit * flats) / denominator * unit)
}

pub fn calculate(input: &MaintenanceInput, rounding_unit: u64) -> Result<MaintenanceResult> {
    if input.number_of_flats == 0 {
        return Err(MaintenanceError::invalid_input(
            "number of flats must be greater than 0",
        ));
    }
    if rounding_unit == 0 {
        return Err(MaintenanceError::invalid_input(
            "rounding unit must be greater than 0",
        ));
    }

    let total_expense = [input.water, input.watchman, input.garbage]
        .into_iter()
        .try_fold(input.electricity, u64::checked_add)
        .ok_or_else(|| MaintenanceError::invalid_input("total expense overflows"))?;

    let flats = u128::from(input.number_of_flats);
    let raw_cost_per_flat = total_expense as f64 / f64::from(input.number_of_flats);

    let rounded = round_to_nearest(total_expense, input.number_of_flats, rounding_unit)
        .ok_or_else(|| MaintenanceError::invalid_input("nothing to divide the total between"))?;

    let rounded_cost_per_flat = u64::try_from(rounded)
        .map_err(|_| MaintenanceError::invalid_input("cost per flat overflows"))?;
    let total_collected = u64::try_from(rounded * flats)
        .map_err(|_| MaintenanceError::invalid_input("total collected overflows"))?;
    let surplus = i64::try_from(i128::from(total_collected) - i128::from(total_expense))
        .map_err(|_| MaintenanceError::invalid_input("surplus overflows"))?;

    tracing::debug!(
        total_expense,
        raw_cost_per_flat,
        rounded_cost_per_flat,
        total_collected,
        surplus,
        "calculated maintenance"
    );

    Ok(MaintenanceResult {
        total_expense,
        raw_cost_per_flat,
        rounded_cost_per_flat,
        total_collected,
        surplus,
    })
}
