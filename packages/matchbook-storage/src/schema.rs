use crate::staging::{SqlType, TableDef};

/// Derived tables and views. Staging tables are created per load from their [`TableDef`].
pub fn render_schema() -> String {
	expand_includes(include_str!("../../../sql/init.sql"))
}

pub fn create_table_sql(table: &TableDef) -> String {
	let mut columns = table
		.columns
		.iter()
		.map(|column| {
			let not_null = if table.key.contains(&column.name) { " NOT NULL" } else { "" };

			format!("\t{} {}{not_null}", column.name, sql_type_name(column.sql_type))
		})
		.collect::<Vec<_>>();

	columns.push(format!("\tPRIMARY KEY ({})", table.key.join(", ")));

	format!("CREATE TABLE {} (\n{}\n)", table.name, columns.join(",\n"))
}

pub fn drop_table_sql(table: &TableDef) -> String {
	format!("DROP TABLE IF EXISTS {}", table.name)
}

pub fn split_statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').map(str::trim).filter(|statement| !statement.is_empty())
}

fn sql_type_name(sql_type: SqlType) -> &'static str {
	match sql_type {
		SqlType::Text => "text",
		SqlType::Integer => "integer",
		SqlType::Real => "real",
		SqlType::Boolean => "boolean",
		SqlType::Date => "date",
	}
}

fn expand_includes(sql: &str) -> String {
	let mut out = String::new();

	for line in sql.lines() {
		let trimmed = line.trim();

		if let Some(path) = trimmed.strip_prefix("\\ir ") {
			match path.trim() {
				"tables/001_load_runs.sql" =>
					out.push_str(include_str!("../../../sql/tables/001_load_runs.sql")),
				"tables/002_latest_filings.sql" =>
					out.push_str(include_str!("../../../sql/tables/002_latest_filings.sql")),
				"tables/003_deal_features.sql" =>
					out.push_str(include_str!("../../../sql/tables/003_deal_features.sql")),
				"tables/004_adviser_features.sql" =>
					out.push_str(include_str!("../../../sql/tables/004_adviser_features.sql")),
				"tables/005_deal_adviser_scores.sql" =>
					out.push_str(include_str!("../../../sql/tables/005_deal_adviser_scores.sql")),
				"tables/006_deal_candidate_stats.sql" =>
					out.push_str(include_str!("../../../sql/tables/006_deal_candidate_stats.sql")),
				"views/001_vw_latest.sql" =>
					out.push_str(include_str!("../../../sql/views/001_vw_latest.sql")),
				"views/002_vw_features.sql" =>
					out.push_str(include_str!("../../../sql/views/002_vw_features.sql")),
				"views/003_vw_investor_deal_candidates.sql" => out.push_str(include_str!(
					"../../../sql/views/003_vw_investor_deal_candidates.sql"
				)),
				"views/004_vw_investor_deal_scored.sql" => out
					.push_str(include_str!("../../../sql/views/004_vw_investor_deal_scored.sql")),
				_ => out.push_str(line),
			}
		} else {
			out.push_str(line);
		}

		out.push('\n');
	}

	out
}
