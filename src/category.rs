//! Budget categories as carried by the reset form's hidden fields.
//!
//! A list is serialized as records separated by `;`, each record holding
//! [`FIELD_COUNT`] positional fields separated by `,`. Delimiters inside a
//! field are not escaped, so a name containing `,` or `;` does not survive
//! the trip.

use std::fmt;

use crate::error::RecordError;

pub const FIELD_COUNT: usize = 11;

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryOverview {
	pub id: i64,
	pub name: String,
	pub budget_input: f64,
	pub input_interval: i64,
	pub input_period_id: i64,
	pub input_period_caption: String,
	pub spending_limit: f64,
	pub period_start: i64,
	pub period_end: i64,
	/// Amount allocated by the pending reset. Only meaningful while used.
	pub initial_amount: f64,
	pub current_amount: f64,
}

impl CategoryOverview {
	pub fn parse(record: &str) -> Result<Self, RecordError> {
		let fields: Vec<&str> = record.split(',').collect();
		if fields.len() < FIELD_COUNT {
			return Err(RecordError::MissingFields {
				found: fields.len(),
				expected: FIELD_COUNT,
			});
		}

		Ok(CategoryOverview {
			id: parse_int("ID", fields[0])?,
			name: fields[1].to_string(),
			budget_input: parse_amount("BudgetInput", fields[2])?,
			input_interval: parse_int("InputInterval", fields[3])?,
			input_period_id: parse_int("InputPeriodId", fields[4])?,
			input_period_caption: fields[5].to_string(),
			spending_limit: parse_amount("SpendingLimit", fields[6])?,
			period_start: parse_int("PeriodStart", fields[7])?,
			period_end: parse_int("PeriodEnd", fields[8])?,
			initial_amount: parse_amount("InitialAmount", fields[9])?,
			current_amount: parse_amount("CurrentAmount", fields[10])?,
		})
	}
}

impl fmt::Display for CategoryOverview {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{},{},{},{},{},{},{},{},{},{},{}",
			self.id,
			self.name,
			js_number(self.budget_input),
			self.input_interval,
			self.input_period_id,
			self.input_period_caption,
			js_number(self.spending_limit),
			self.period_start,
			self.period_end,
			js_number(self.initial_amount),
			js_number(self.current_amount),
		)
	}
}

/// Reads a hidden field. Malformed records are reported and skipped,
/// the remaining records are still read.
pub fn parse_categories(text: &str) -> Vec<CategoryOverview> {
	text.split(';')
		.filter(|record| !record.is_empty())
		.filter_map(|record| match CategoryOverview::parse(record) {
			Ok(category) => Some(category),
			Err(err) => {
				tracing::error!(%err, record, "dropping malformed category record");
				None
			}
		})
		.collect()
}

pub fn format_categories(categories: &[CategoryOverview]) -> String {
	categories
		.iter()
		.map(ToString::to_string)
		.collect::<Vec<_>>()
		.join(";")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
	pub id: i64,
	pub caption: String,
}

/// Reads the `ID,Caption;ID,Caption` list of a `data-periods` attribute.
pub fn parse_periods(text: &str) -> Vec<Period> {
	text.split(';')
		.filter(|entry| !entry.is_empty())
		.filter_map(|entry| {
			let mut parts = entry.split(',');
			let id = parts.next().and_then(|id| id.trim().parse().ok());
			match (id, parts.next()) {
				(Some(id), Some(caption)) => Some(Period {
					id,
					caption: caption.to_string(),
				}),
				_ => {
					tracing::warn!(entry, "dropping malformed period");
					None
				}
			}
		})
		.collect()
}

/// Text shown on a card of the unused list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedCard {
	pub name: String,
	pub amount: String,
	pub input: String,
	pub spending_limit: String,
	pub period: String,
}

impl UnusedCard {
	pub fn new(category: &CategoryOverview) -> Self {
		UnusedCard {
			name: category.name.clone(),
			amount: fixed2(category.current_amount),
			input: fixed2(category.budget_input),
			spending_limit: fixed2(category.spending_limit),
			period: category.input_period_caption.clone(),
		}
	}
}

/// Text shown on a card of the used list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedCard {
	pub name: String,
	pub amount_current: String,
	pub amount_add: String,
	pub input: String,
	pub spending_limit: String,
	pub period: String,
}

impl UsedCard {
	pub fn new(category: &CategoryOverview, periods: &[Period]) -> Self {
		// Unknown period ids fall back to the caption the server rendered.
		let caption = periods
			.iter()
			.find(|p| p.id == category.input_period_id)
			.map(|p| p.caption.as_str())
			.unwrap_or(category.input_period_caption.as_str());

		UsedCard {
			name: category.name.clone(),
			amount_current: fixed2(category.current_amount + category.initial_amount),
			amount_add: fixed2(category.initial_amount),
			input: fixed2(category.budget_input),
			spending_limit: fixed2(category.spending_limit),
			period: format!("{} {}", category.input_interval, caption),
		}
	}
}

/// Formats a number the way JavaScript's `Number#toString` does for
/// the values found in budget amounts.
pub fn js_number(value: f64) -> String {
	if value == 0.0 {
		// also folds -0
		return "0".to_string();
	}
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	value.to_string()
}

pub fn fixed2(value: f64) -> String {
	format!("{:.2}", value)
}

pub(crate) fn parse_amount(field: &'static str, text: &str) -> Result<f64, RecordError> {
	match text.trim().parse::<f64>() {
		Ok(value) if value.is_finite() => Ok(value),
		_ => Err(RecordError::InvalidNumber {
			field,
			value: text.to_string(),
		}),
	}
}

pub(crate) fn parse_int(field: &'static str, text: &str) -> Result<i64, RecordError> {
	text.trim()
		.parse::<i64>()
		.map_err(|_| RecordError::InvalidNumber {
			field,
			value: text.to_string(),
		})
}
