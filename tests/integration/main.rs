//! Integration tests for sqleq-symtab

mod derivation_test;
mod parallel_test;
mod partition_props;

/// Route `tracing` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Schema from the customers/contacts/invoices scenario
pub const SCHEMA: &str = r#"[
    {"TableName": "Customers",
     "PKeys": [{"Name": "customer_id", "Type": "int"}],
     "FKeys": [],
     "Others": [{"Name": "customer_name", "Type": "varchar"},
                {"Name": "email", "Type": "varchar"}]},
    {"TableName": "Contacts",
     "PKeys": [{"Name": "user_id", "Type": "int"},
               {"Name": "contact_email", "Type": "varchar"}],
     "FKeys": [],
     "Others": [{"Name": "contact_name", "Type": "varchar"}]},
    {"TableName": "Invoices",
     "PKeys": [{"Name": "invoice_id", "Type": "int"}],
     "FKeys": [{"FName": "user_id", "PName": "customer_id", "PTable": "0"}],
     "Others": [{"Name": "price", "Type": "int"}]}
]"#;
