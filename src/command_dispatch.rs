//! Purpose: Hold top-level CLI command dispatch for `carton`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Output envelopes and exit code semantics stay stable.
//! Invariants: Human output appears only when stdout is a terminal.

use super::*;

pub(super) fn dispatch_command(command: Command, client: &LocalClient) -> Result<(), Error> {
    match command {
        Command::Add { cart, name, price } => {
            let mut store = client.open_cart(&cart, CartOptions::new())?;
            let count = store.add_item(CartItem::new(name.clone(), price.clone()))?;
            emit_json(json!({
                "added": { "cart": cart, "name": name, "price": price, "count": count }
            }));
            Ok(())
        }
        Command::Items { cart, json: always_json } => {
            let store = client.open_cart(&cart, CartOptions::new())?;
            let items = store.items()?;
            if always_json || !io::stdout().is_terminal() {
                let values: Vec<Value> = items.iter().map(item_json).collect();
                emit_json(json!({ "cart": cart, "items": values }));
            } else if items.is_empty() {
                println!("Your cart is empty.");
            } else {
                for item in &items {
                    println!("{} - {}", item.name, item.price);
                }
            }
            Ok(())
        }
        Command::Clear { cart } => {
            let mut store = client.open_cart(&cart, CartOptions::new())?;
            store.clear()?;
            emit_json(json!({ "cleared": { "cart": cart } }));
            Ok(())
        }
        Command::List => {
            let carts = client.list_carts()?;
            let values: Vec<Value> = carts
                .iter()
                .map(|info| {
                    json!({
                        "cart": info.name,
                        "path": info.path.to_string_lossy(),
                        "items": info.items,
                    })
                })
                .collect();
            emit_json(json!({ "carts": values }));
            Ok(())
        }
    }
}
