//! Output formatting

use campus_forms::{FieldView, FormField};
use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Format named in the config file, when it is a known one
    pub fn from_config(name: Option<&str>) -> Option<Self> {
        name.and_then(|n| <Self as ValueEnum>::from_str(n, true).ok())
    }

    /// Print `data` as-is for json/yaml, or one table row per item
    pub fn print_rows<T, R, F>(&self, data: &[T], to_row: F)
    where
        T: Serialize,
        R: Tabled,
        F: Fn(&T) -> R,
    {
        match self {
            OutputFormat::Table => {
                let rows: Vec<R> = data.iter().map(to_row).collect();
                println!("{}", Table::new(rows).with(Style::rounded()));
            }
            _ => self.print(data),
        }
    }

    pub fn print<T: Serialize + ?Sized>(&self, data: &T) {
        match self {
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            _ => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }
}

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Type")]
    pub field_type: String,
    #[tabled(rename = "Required")]
    pub required: &'static str,
    #[tabled(rename = "Options")]
    pub options: String,
    #[tabled(rename = "Shown when")]
    pub shown_when: String,
}

impl FieldRow {
    pub fn from_field(fields: &[FormField], field: &FormField) -> Self {
        Self {
            id: field.id.value(),
            label: field.label.clone(),
            field_type: field.field_type.to_string(),
            required: yes_no(field.is_required),
            options: field.options.join(", "),
            shown_when: campus_forms::condition_text(fields, field).unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
pub struct AnswerRow {
    #[tabled(rename = "ID")]
    pub id: u64,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Required")]
    pub required: &'static str,
    #[tabled(rename = "Answer")]
    pub answer: String,
    #[tabled(rename = "Error")]
    pub error: String,
}

impl From<&FieldView> for AnswerRow {
    fn from(view: &FieldView) -> Self {
        Self {
            id: view.id,
            label: view.label.clone(),
            required: yes_no(view.required),
            answer: view.answer.clone().unwrap_or_default(),
            error: view.error.clone().unwrap_or_default(),
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_config() {
        assert_eq!(OutputFormat::from_config(Some("YAML")), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_config(Some("xml")), None);
        assert_eq!(OutputFormat::from_config(None), None);
    }
}
