use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<devserve_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;

    let added_fields = migrate_document(&mut doc)?;

    // Only write if something changed
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(devserve_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Applies every migration step, returning a description of each change
pub(crate) fn migrate_document(doc: &mut DocumentMut) -> anyhow::Result<Vec<String>> {
    let mut added_fields = Vec::new();

    migrate_root_keys(doc, &mut added_fields);
    migrate_server_section(doc, &mut added_fields)?;
    migrate_rewrites_section(doc, &mut added_fields);
    migrate_watch_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn migrate_root_keys(doc: &mut DocumentMut, added_fields: &mut Vec<String>) {
    let root = doc.as_table_mut();

    // camelCase names from older project files
    rename_field(root, "rootPath", "root_path", added_fields);
    rename_field(root, "sourcePath", "source_path", added_fields);
    rename_field(root, "extensionRewrites", "extension_rewrites", added_fields);

    ensure_field(root, "root_path", Value::from("."), added_fields);
    ensure_field(root, "source_path", Value::from("source"), added_fields);
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    // Ensure [server] section exists
    if !doc.contains_key("server") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["server"] = Item::Table(table);
        added_fields.push("server".to_string());
    }

    let server = doc["server"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [server] section in config"))?;

    rename_field(server, "directoryIndex", "directory_index", added_fields);
    rename_field(server, "catchAll", "catch_all", added_fields);

    ensure_field(server, "host", Value::from("127.0.0.1"), added_fields);
    ensure_field(server, "port", Value::from(5678), added_fields);
    ensure_field(server, "namespace", Value::from("/"), added_fields);
    ensure_field(
        server,
        "directory_index",
        Value::from("index.html"),
        added_fields,
    );

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_rewrites_section(doc: &mut DocumentMut, added_fields: &mut Vec<String>) {
    if doc.contains_key("extension_rewrites") {
        return;
    }

    let mut table = Table::new();
    for (compiled, sources) in super::defaults::extension_rewrites() {
        let mut arr = Array::new();
        for source in sources {
            arr.push(source);
        }
        table.insert(&compiled, Item::Value(Value::Array(arr)));
    }
    doc["extension_rewrites"] = Item::Table(table);
    added_fields.push("extension_rewrites".to_string());
}

fn migrate_watch_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    if !doc.contains_key("watch") {
        let mut table = Table::new();
        table.set_implicit(true);
        doc["watch"] = Item::Table(table);
        added_fields.push("watch".to_string());
    }

    let watch = doc["watch"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [watch] section in config"))?;
    ensure_field(watch, "enabled", Value::from(true), added_fields);
    ensure_field(watch, "debounce_ms", Value::from(300), added_fields);

    Ok(())
}

fn rename_field(table: &mut Table, old_key: &str, new_key: &str, added_fields: &mut Vec<String>) {
    if let Some(item) = table.remove(old_key) {
        if !table.contains_key(new_key) {
            table.insert(new_key, item);
        }
        added_fields.push(format!("{} (renamed from {})", new_key, old_key));
    }
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
