use crate::core::formatter::CurrencyFormatter;
use crate::domain::model::{MaintenanceInput, MaintenanceResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub label: &'static str,
    pub value: String,
    pub description: String,
    pub highlight: bool,
}

/// The summary cards shown after a calculation, in display order.
pub fn result_cards(
    input: &MaintenanceInput,
    result: &MaintenanceResult,
    rounding_unit: u64,
    formatter: &CurrencyFormatter,
) -> Vec<ResultCard> {
    vec![
        ResultCard {
            label: "Total Monthly Expense",
            value: formatter.format_currency(result.total_expense),
            description: "Sum of all utility bills".to_string(),
            highlight: false,
        },
        ResultCard {
            label: "Maintenance Per Flat",
            value: formatter.format_currency(result.rounded_cost_per_flat),
            description: format!(
                "Rounded to nearest {}",
                formatter.format_currency(rounding_unit)
            ),
            highlight: true,
        },
        ResultCard {
            label: "Total Amount Collected",
            value: formatter.format_currency(result.total_collected),
            description: format!("From {} flats", input.number_of_flats),
            highlight: false,
        },
        ResultCard {
            label: "Miscellaneous Fund",
            value: formatter.format_currency(result.surplus),
            description: "Extra saved for future expenses".to_string(),
            highlight: false,
        },
    ]
}

pub fn render_breakdown(
    input: &MaintenanceInput,
    result: &MaintenanceResult,
    rounding_unit: u64,
    formatter: &CurrencyFormatter,
) -> String {
    let unit = formatter.format_currency(rounding_unit);
    let mut out = String::new();

    for card in result_cards(input, result, rounding_unit, formatter) {
        let marker = if card.highlight { "*" } else { " " };
        out.push_str(&format!(
            "{} {:<24}{:>14}   {}\n",
            marker, card.label, card.value, card.description
        ));
    }

    out.push_str("\nCalculation Breakdown\n");
    out.push_str(&format!(
        "  Raw cost per flat:        {}\n",
        formatter.format_fractional(result.raw_cost_per_flat)
    ));
    out.push_str(&format!(
        "  Rounded to nearest {}: {}\n",
        unit,
        formatter.format_currency(result.rounded_cost_per_flat)
    ));
    out.push_str(&format!(
        "\nMaintenance is rounded to the nearest {} to keep amounts simple. \
         The extra collected forms a small common fund for unexpected apartment expenses.\n",
        unit
    ));
    out
}
