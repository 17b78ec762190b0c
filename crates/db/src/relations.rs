//! Declarative foreign-key expansion for joined reads.
//!
//! A [`JoinedRead`] names the base table and the relations to embed. Each
//! [`Expansion`] becomes a `LEFT JOIN` plus a nested `json_build_object`
//! column, so a row decodes into its flat columns plus one JSON object per
//! expanded relation. Rendering is pure string building and never touches
//! the database.
//!
//! ```text
//! SELECT a.id, a.student_id, ...,
//!        CASE WHEN p.id IS NULL THEN NULL ELSE json_build_object(
//!            'id', p.id, 'name', p.name,
//!            'university', CASE WHEN u.id IS NULL THEN NULL ELSE json_build_object(...) END
//!        ) END AS program
//! FROM applications a
//! LEFT JOIN programs p ON p.id = a.program_id
//! LEFT JOIN universities u ON u.id = p.university_id
//! ```

/// A many-to-one relation embedded as a nested JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Expansion {
    /// Output key; also the SQL column alias at the top level.
    pub key: &'static str,
    /// Referenced table.
    pub table: &'static str,
    /// SQL alias for the referenced table. Must be unique within a read.
    pub alias: &'static str,
    /// Column on the referencing side that holds the foreign key.
    pub foreign_key: &'static str,
    /// Columns of the referenced table copied into the object.
    pub columns: &'static [&'static str],
    /// Relations of the referenced table to embed inside this object.
    pub nested: &'static [Expansion],
}

/// A base table read with its expansions.
#[derive(Debug, Clone, Copy)]
pub struct JoinedRead {
    pub table: &'static str,
    pub alias: &'static str,
    /// Comma-separated base column list (the repo's `COLUMNS` constant).
    pub columns: &'static str,
    pub expansions: &'static [Expansion],
}

impl JoinedRead {
    /// Render `SELECT ... FROM ... LEFT JOIN ...`. Callers append their own
    /// `WHERE` and `ORDER BY` clauses, referring to base columns through
    /// [`JoinedRead::alias`].
    pub fn select_sql(&self) -> String {
        let mut select: Vec<String> = self
            .columns
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("{}.{c}", self.alias))
            .collect();

        let mut joins = Vec::new();
        for expansion in self.expansions {
            select.push(format!(
                "{} AS {}",
                expansion.json_object_sql(),
                expansion.key
            ));
            expansion.collect_joins(self.alias, &mut joins);
        }

        let mut sql = format!(
            "SELECT {} FROM {} {}",
            select.join(", "),
            self.table,
            self.alias
        );
        for join in joins {
            sql.push(' ');
            sql.push_str(&join);
        }
        sql
    }

    /// Every table alias used by the read, base alias first.
    pub fn aliases(&self) -> Vec<&'static str> {
        let mut out = vec![self.alias];
        for expansion in self.expansions {
            expansion.collect_aliases(&mut out);
        }
        out
    }
}

impl Expansion {
    fn json_object_sql(&self) -> String {
        let mut pairs: Vec<String> = self
            .columns
            .iter()
            .map(|c| format!("'{c}', {}.{c}", self.alias))
            .collect();
        for nested in self.nested {
            pairs.push(format!("'{}', {}", nested.key, nested.json_object_sql()));
        }
        format!(
            "CASE WHEN {alias}.id IS NULL THEN NULL ELSE json_build_object({}) END",
            pairs.join(", "),
            alias = self.alias
        )
    }

    fn collect_joins(&self, parent_alias: &str, joins: &mut Vec<String>) {
        joins.push(format!(
            "LEFT JOIN {table} {alias} ON {alias}.id = {parent_alias}.{fk}",
            table = self.table,
            alias = self.alias,
            fk = self.foreign_key
        ));
        for nested in self.nested {
            nested.collect_joins(self.alias, joins);
        }
    }

    fn collect_aliases(&self, out: &mut Vec<&'static str>) {
        out.push(self.alias);
        for nested in self.nested {
            nested.collect_aliases(out);
        }
    }
}
