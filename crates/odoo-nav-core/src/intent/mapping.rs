//! Static entity tables.
//!
//! `NAVIGATION_MAPPING` maps an entity to the menu names worth searching for;
//! its declaration order is also the order of the keyword scan in the rule
//! fallback. `MODULE_MAPPING` maps an entity to the Odoo model whose window
//! action can stand in when no menu matches.

pub const NAVIGATION_MAPPING: &[(&str, &[&str])] = &[
    ("sales", &["Sales", "sale"]),
    ("sale", &["Sales", "sale"]),
    ("invoices", &["Invoicing", "invoicing"]),
    ("invoicing", &["Invoicing", "invoicing"]),
    ("customers", &["Contacts", "contacts"]),
    ("contacts", &["Contacts", "contacts"]),
    ("products", &["Products", "product"]),
    ("product", &["Products", "product"]),
    ("inventory", &["Inventory", "inventory"]),
    ("stock", &["Inventory", "inventory"]),
    ("purchases", &["Purchase", "purchase"]),
    ("purchase", &["Purchase", "purchase"]),
    ("employees", &["Employees", "employee"]),
    ("employee", &["Employees", "employee"]),
    ("settings", &["Settings", "settings"]),
    ("apps", &["Apps", "apps"]),
    ("modules", &["Apps", "apps"]),
    ("dashboard", &["Dashboards", "dashboard"]),
    ("dashboards", &["Dashboards", "dashboard"]),
    ("calendar", &["Calendar", "calendar"]),
    ("discuss", &["Discuss", "discuss"]),
    ("inbox", &["Inbox", "inbox"]),
    ("messages", &["Inbox", "inbox"]),
    ("crm", &["CRM", "crm"]),
    ("leads", &["Leads", "leads"]),
    ("opportunities", &["Opportunities", "opportunities"]),
    ("website", &["Website", "website"]),
    ("pos", &["Point of Sale", "pos"]),
    ("manufacturing", &["Manufacturing", "manufacturing"]),
    ("projects", &["Projects", "projects"]),
];

pub const MODULE_MAPPING: &[(&str, &str)] = &[
    ("sales", "sale.order"),
    ("sale orders", "sale.order"),
    ("sale order", "sale.order"),
    ("orders", "sale.order"),
    ("invoices", "account.move"),
    ("invoice", "account.move"),
    ("invoicing", "account.move"),
    ("bills", "account.move"),
    ("customers", "res.partner"),
    ("customer", "res.partner"),
    ("partners", "res.partner"),
    ("partner", "res.partner"),
    ("contacts", "res.partner"),
    ("products", "product.template"),
    ("product", "product.template"),
    ("inventory", "stock.quant"),
    ("stock", "stock.quant"),
    ("purchases", "purchase.order"),
    ("purchase orders", "purchase.order"),
    ("purchase", "purchase.order"),
    ("employees", "hr.employee"),
    ("employee", "hr.employee"),
    ("users", "res.users"),
    ("user", "res.users"),
    ("payments", "account.payment"),
    ("payment", "account.payment"),
    ("leads", "crm.lead"),
    ("lead", "crm.lead"),
    ("opportunities", "crm.lead"),
    ("opportunity", "crm.lead"),
    ("settings", "res.config.settings"),
    ("configuration", "res.config.settings"),
    ("apps", "ir.module.module"),
    ("modules", "ir.module.module"),
    ("dashboard", "board.board"),
    ("dashboards", "board.board"),
    ("inbox", "mail.message"),
    ("discuss", "mail.message"),
    ("messages", "mail.message"),
];

/// Menu names to try for `entity`, empty when the entity is not a table key.
pub fn navigation_targets(entity: &str) -> Vec<String> {
    NAVIGATION_MAPPING
        .iter()
        .find(|(key, _)| *key == entity)
        .map(|(_, targets)| targets.iter().map(|t| t.to_string()).collect())
        .unwrap_or_default()
}

pub fn odoo_model(entity: &str) -> Option<String> {
    MODULE_MAPPING
        .iter()
        .find(|(key, _)| *key == entity)
        .map(|(_, model)| model.to_string())
}

/// First navigation key contained anywhere in `input`.
pub fn find_navigation_key(input: &str) -> Option<&'static str> {
    NAVIGATION_MAPPING
        .iter()
        .map(|(key, _)| *key)
        .find(|key| input.contains(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(NAVIGATION_MAPPING.len(), 30);
        assert_eq!(MODULE_MAPPING.len(), 39);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(navigation_targets("stock"), vec!["Inventory", "inventory"]);
        assert_eq!(navigation_targets("pos"), vec!["Point of Sale", "pos"]);
        assert!(navigation_targets("bills").is_empty());
        assert_eq!(odoo_model("bills").as_deref(), Some("account.move"));
        assert_eq!(odoo_model("calendar"), None);
    }

    #[test]
    fn test_keyword_scan_follows_declaration_order() {
        // "sales" is declared before "sale" and both occur in the input.
        assert_eq!(find_navigation_key("my sales numbers"), Some("sales"));
        // "product" occurs inside "products"; "products" comes first.
        assert_eq!(find_navigation_key("products please"), Some("products"));
        assert_eq!(find_navigation_key("what's the weather"), None);
    }
}
