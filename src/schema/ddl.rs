// src/schema/ddl.rs

/// Wrap an identifier in double quotes, doubling any embedded quote.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `CREATE TABLE` with an autoincrementing `id_column` followed by one TEXT column per name.
pub fn create_table_sql(table: &str, id_column: &str, columns: &[String]) -> String {
    let mut defs = Vec::with_capacity(columns.len() + 1);
    defs.push(format!(
        "{} INTEGER PRIMARY KEY AUTOINCREMENT",
        quote_ident(id_column)
    ));
    defs.extend(columns.iter().map(|c| format!("{} TEXT", quote_ident(c))));

    format!("CREATE TABLE {} (\n  {}\n)", quote_ident(table), defs.join(",\n  "))
}

/// Parameterized `INSERT` with one positional placeholder per column.
pub fn insert_sql(table: &str, columns: &[String]) -> String {
    if columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quote_ident(table));
    }

    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let placeholders = vec!["?"; columns.len()];
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        placeholders.join(", ")
    )
}
