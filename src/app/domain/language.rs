use std::collections::HashMap;

/// SQL dialect selected by the `sql`, `mysql` and `pgsql` modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlDialect {
    Standard,
    MySql,
    PostgreSql,
}

impl SqlDialect {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgresql",
        }
    }

    /// Grammar a user syntax folder may provide for this dialect.
    pub fn syntax_name(self) -> Option<&'static str> {
        match self {
            Self::Standard => None,
            Self::MySql => Some("MySQL"),
            Self::PostgreSql => Some("PostgreSQL"),
        }
    }
}

/// How the grammar for a mode tokenizes its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grammar {
    /// Full parser-backed grammar.
    Structured,
    /// Line-oriented legacy grammar.
    Stream,
}

/// A ready-to-use syntax configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageExtension {
    pub mode: LanguageMode,
    /// Syntect syntax names to try, in order, after any dialect grammar.
    pub syntax_names: &'static [&'static str],
    /// File-extension token tried after `syntax_names`.
    pub token: &'static str,
    pub grammar: Grammar,
    pub jsx: bool,
    pub typescript: bool,
    pub dialect: Option<SqlDialect>,
}

impl LanguageExtension {
    const fn structured(mode: LanguageMode, syntax_names: &'static [&'static str], token: &'static str) -> Self {
        Self {
            mode,
            syntax_names,
            token,
            grammar: Grammar::Structured,
            jsx: false,
            typescript: false,
            dialect: None,
        }
    }

    const fn stream(mode: LanguageMode, syntax_names: &'static [&'static str], token: &'static str) -> Self {
        Self {
            grammar: Grammar::Stream,
            ..Self::structured(mode, syntax_names, token)
        }
    }

    /// Syntax names to try: the SQL dialect's own grammar first, then
    /// `syntax_names`.
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.dialect
            .and_then(SqlDialect::syntax_name)
            .into_iter()
            .chain(self.syntax_names.iter().copied())
    }

    /// One-line summary for logs, e.g. `tsx (structured, jsx, typescript)`.
    pub fn describe(&self) -> String {
        let mut traits = vec![match self.grammar {
            Grammar::Structured => "structured",
            Grammar::Stream => "stream",
        }];
        if self.jsx {
            traits.push("jsx");
        }
        if self.typescript {
            traits.push("typescript");
        }
        if let Some(dialect) = self.dialect {
            traits.push(dialect.as_str());
        }
        format!("{} ({})", self.mode.name(), traits.join(", "))
    }

    fn javascript(mode: LanguageMode, jsx: bool, typescript: bool) -> Self {
        let (syntax_names, token): (&'static [&'static str], &'static str) = match (jsx, typescript) {
            (false, false) => (&["JavaScript"], "js"),
            (true, false) => (&["JavaScript (Babel)", "JavaScript"], "jsx"),
            (false, true) => (&["TypeScript", "JavaScript"], "ts"),
            (true, true) => (&["TypeScriptReact", "TypeScript", "JavaScript"], "tsx"),
        };
        Self {
            jsx,
            typescript,
            ..Self::structured(mode, syntax_names, token)
        }
    }

    fn sql(mode: LanguageMode, dialect: SqlDialect) -> Self {
        Self {
            dialect: Some(dialect),
            ..Self::structured(mode, &["SQL"], "sql")
        }
    }
}

/// Every supported language mode. Each variant is the producer of its own
/// `LanguageExtension`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageMode {
    JavaScript,
    Jsx,
    TypeScript,
    Tsx,
    Json,
    Html,
    Css,
    Python,
    Markdown,
    Xml,
    Sql,
    MySql,
    PgSql,
    Java,
    Rust,
    Cpp,
    Lezer,
    Php,
    Go,
    Ruby,
    Shell,
    Lua,
    Swift,
    Tcl,
    Yaml,
    Vb,
    PowerShell,
}

impl LanguageMode {
    pub const ALL: [LanguageMode; 27] = [
        Self::JavaScript,
        Self::Jsx,
        Self::TypeScript,
        Self::Tsx,
        Self::Json,
        Self::Html,
        Self::Css,
        Self::Python,
        Self::Markdown,
        Self::Xml,
        Self::Sql,
        Self::MySql,
        Self::PgSql,
        Self::Java,
        Self::Rust,
        Self::Cpp,
        Self::Lezer,
        Self::Php,
        Self::Go,
        Self::Ruby,
        Self::Shell,
        Self::Lua,
        Self::Swift,
        Self::Tcl,
        Self::Yaml,
        Self::Vb,
        Self::PowerShell,
    ];

    /// Registry key shown in the language selector.
    pub fn name(self) -> &'static str {
        match self {
            Self::JavaScript => "javascript",
            Self::Jsx => "jsx",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
            Self::Json => "json",
            Self::Html => "html",
            Self::Css => "css",
            Self::Python => "python",
            Self::Markdown => "markdown",
            Self::Xml => "xml",
            Self::Sql => "sql",
            Self::MySql => "mysql",
            Self::PgSql => "pgsql",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Cpp => "cpp",
            Self::Lezer => "lezer",
            Self::Php => "php",
            Self::Go => "go",
            Self::Ruby => "ruby",
            Self::Shell => "shell",
            Self::Lua => "lua",
            Self::Swift => "swift",
            Self::Tcl => "tcl",
            Self::Yaml => "yaml",
            Self::Vb => "vb",
            Self::PowerShell => "powershell",
        }
    }

    /// Build a fresh syntax configuration for this mode.
    pub fn produce(self) -> LanguageExtension {
        use LanguageExtension as Ext;
        match self {
            Self::JavaScript => Ext::javascript(self, false, false),
            Self::Jsx => Ext::javascript(self, true, false),
            Self::TypeScript => Ext::javascript(self, false, true),
            Self::Tsx => Ext::javascript(self, true, true),
            Self::Json => Ext::structured(self, &["JSON"], "json"),
            Self::Html => Ext::structured(self, &["HTML"], "html"),
            Self::Css => Ext::structured(self, &["CSS"], "css"),
            Self::Python => Ext::structured(self, &["Python"], "py"),
            Self::Markdown => Ext::structured(self, &["Markdown"], "md"),
            Self::Xml => Ext::structured(self, &["XML"], "xml"),
            Self::Sql => Ext::sql(self, SqlDialect::Standard),
            Self::MySql => Ext::sql(self, SqlDialect::MySql),
            Self::PgSql => Ext::sql(self, SqlDialect::PostgreSql),
            Self::Java => Ext::structured(self, &["Java"], "java"),
            Self::Rust => Ext::structured(self, &["Rust"], "rs"),
            Self::Cpp => Ext::structured(self, &["C++"], "cpp"),
            Self::Lezer => Ext::structured(self, &["Lezer"], "grammar"),
            Self::Php => Ext::structured(self, &["PHP"], "php"),
            Self::Go => Ext::stream(self, &["Go"], "go"),
            Self::Ruby => Ext::stream(self, &["Ruby"], "rb"),
            Self::Shell => Ext::stream(self, &["Bourne Again Shell (bash)"], "sh"),
            Self::Lua => Ext::stream(self, &["Lua"], "lua"),
            Self::Swift => Ext::stream(self, &["Swift"], "swift"),
            Self::Tcl => Ext::stream(self, &["Tcl"], "tcl"),
            Self::Yaml => Ext::stream(self, &["YAML"], "yaml"),
            Self::Vb => Ext::stream(self, &["VB.NET", "Visual Basic"], "vb"),
            Self::PowerShell => Ext::stream(self, &["PowerShell"], "ps1"),
        }
    }
}

/// Name → producer lookup table, built once at startup.
pub struct LanguageRegistry {
    by_name: HashMap<&'static str, LanguageMode>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        let by_name = LanguageMode::ALL.iter().map(|&mode| (mode.name(), mode)).collect();
        Self { by_name }
    }

    /// Case-sensitive. A miss means the language is unsupported.
    pub fn lookup(&self, name: &str) -> Option<LanguageMode> {
        self.by_name.get(name).copied()
    }

    /// Registered names in selector order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        LanguageMode::ALL.iter().map(|mode| mode.name())
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
