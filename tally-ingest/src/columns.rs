//! Header text → semantic column roles.

use std::fmt;

use once_cell::sync::Lazy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Date,
    Time,
    Description,
    Amount,
    Balance,
}

impl Role {
    /// Priority order used when a header could name more than one role
    /// ("Balance Amount" is a balance, "Value Date" is a date).
    pub const MATCH_ORDER: [Role; 5] = [
        Role::Date,
        Role::Time,
        Role::Balance,
        Role::Amount,
        Role::Description,
    ];

    fn slot(&self) -> usize {
        match self {
            Role::Date => 0,
            Role::Time => 1,
            Role::Description => 2,
            Role::Amount => 3,
            Role::Balance => 4,
        }
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Role::Date => &DATE_ALIASES,
            Role::Time => &TIME_ALIASES,
            Role::Description => &DESCRIPTION_ALIASES,
            Role::Amount => &AMOUNT_ALIASES,
            Role::Balance => &BALANCE_ALIASES,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Date => "date",
            Role::Time => "time",
            Role::Description => "description",
            Role::Amount => "amount",
            Role::Balance => "balance",
        };
        f.write_str(name)
    }
}

const DATE_ALIASES: [&str; 13] = [
    "date",
    "fecha",
    "datum",
    "transaction date",
    "posting date",
    "posted date",
    "booking date",
    "trans date",
    "fecha operación",
    "fecha operacion",
    "fecha valor",
    "buchungstag",
    "date opération",
];

const TIME_ALIASES: [&str; 5] = ["time", "hora", "hora operación", "hora operacion", "uhrzeit"];

const DESCRIPTION_ALIASES: [&str; 13] = [
    "description",
    "concept",
    "concepto",
    "detail",
    "details",
    "detalle",
    "descripción",
    "descripcion",
    "memo",
    "payee",
    "narrative",
    "verwendungszweck",
    "libellé",
];

const AMOUNT_ALIASES: [&str; 7] = ["amount", "importe", "monto", "value", "betrag", "valor", "montant"];

const BALANCE_ALIASES: [&str; 7] = [
    "balance",
    "saldo",
    "running balance",
    "running bal.",
    "saldo disponible",
    "kontostand",
    "solde",
];

/// All aliases flattened in [`Role::MATCH_ORDER`].
static SUBSTRING_ALIASES: Lazy<Vec<(Role, &'static str)>> = Lazy::new(|| {
    Role::MATCH_ORDER
        .iter()
        .flat_map(|role| role.aliases().iter().map(move |alias| (*role, *alias)))
        .collect()
});

/// Lowercase, unquote and collapse internal whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn exact_role(header: &str) -> Option<Role> {
    Role::MATCH_ORDER
        .into_iter()
        .find(|role| role.aliases().iter().any(|alias| *alias == header))
}

fn substring_role(header: &str) -> Option<Role> {
    SUBSTRING_ALIASES
        .iter()
        .find(|(_, alias)| header.contains(*alias))
        .map(|(role, _)| *role)
}

/// Role → column index for a located header line.
///
/// Each column carries at most one role, so no two roles share an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMapping {
    pub date: usize,
    pub time: Option<usize>,
    pub description: usize,
    pub amount: usize,
    pub balance: Option<usize>,
}

impl HeaderMapping {
    pub fn column(&self, role: Role) -> Option<usize> {
        match role {
            Role::Date => Some(self.date),
            Role::Time => self.time,
            Role::Description => Some(self.description),
            Role::Amount => Some(self.amount),
            Role::Balance => self.balance,
        }
    }
}

/// Map header fields to roles.
///
/// Exact alias matches are assigned first; remaining columns are then tried
/// by substring ("Amount (EUR)", "Posting Date"). A column whose best role is
/// already taken stays unassigned. Returns the first missing mandatory role
/// on failure.
pub fn resolve_columns(fields: &[String]) -> Result<HeaderMapping, Role> {
    let headers: Vec<String> = fields.iter().map(|f| normalize_header(f)).collect();
    let mut slots: [Option<usize>; 5] = [None; 5];
    let mut claimed = vec![false; headers.len()];

    let passes: [fn(&str) -> Option<Role>; 2] = [exact_role, substring_role];
    for pass in passes {
        for (idx, header) in headers.iter().enumerate() {
            if claimed[idx] || header.is_empty() {
                continue;
            }
            let Some(role) = pass(header) else { continue };
            let slot = &mut slots[role.slot()];
            if slot.is_none() {
                *slot = Some(idx);
            }
            // A column that names a taken role is not offered to another role.
            claimed[idx] = true;
        }
    }

    let required = |role: Role| slots[role.slot()].ok_or(role);
    Ok(HeaderMapping {
        date: required(Role::Date)?,
        time: slots[Role::Time.slot()],
        description: required(Role::Description)?,
        amount: required(Role::Amount)?,
        balance: slots[Role::Balance.slot()],
    })
}
