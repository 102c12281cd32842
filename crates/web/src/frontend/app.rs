//! Single-page inventory UI.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;

use stockbook_infra::WebStorage;
use stockbook_inventory::{AddItemForm, EditItemForm};

use crate::config::ShellConfig;
use crate::shell::AppShell;
use crate::types::ItemRow;

type Shell = Rc<RefCell<AppShell<WebStorage>>>;

fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// `None` when the user cancels.
fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    match crate::start_browser(&ShellConfig::default()) {
        Ok(shell) => {
            alert(&shell.startup_notice().to_string());
            view! { <InventoryPage shell=Rc::new(RefCell::new(shell))/> }.into_view()
        }
        Err(e) => {
            let message = format!("Could not load inventory: {e}");
            alert(&message);
            view! { <p class="error">{message}</p> }.into_view()
        }
    }
}

/// Add form, search box, item table and totals.
#[component]
fn InventoryPage(shell: Shell) -> impl IntoView {
    // Bumped after every mutation so derived views re-read the shell.
    let (version, set_version) = create_signal(0u64);
    let (search, set_search) = create_signal(String::new());

    let name = create_rw_signal(String::new());
    let added_date_time = create_rw_signal(String::new());
    let cost_price = create_rw_signal(String::new());
    let selling_price = create_rw_signal(String::new());
    let quantity = create_rw_signal(String::new());

    let add_shell = shell.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let form = AddItemForm {
            name: name.get_untracked(),
            added_date_time: added_date_time.get_untracked(),
            cost_price: cost_price.get_untracked(),
            selling_price: selling_price.get_untracked(),
            quantity: quantity.get_untracked(),
        };
        let result = add_shell.borrow_mut().submit_add(&form);
        match result {
            Ok(_) => {
                for field in [name, added_date_time, cost_price, selling_price, quantity] {
                    field.set(String::new());
                }
                set_version.update(|v| *v += 1);
            }
            Err(e) => alert(&e.user_message()),
        }
    };

    let rows_shell = shell.clone();
    let rows = create_memo(move |_| {
        version.get();
        rows_shell.borrow().rows(&search.get())
    });

    let summary_shell = shell.clone();
    let summary = create_memo(move |_| {
        version.get();
        summary_shell.borrow().summary()
    });

    view! {
        <div class="app">
            <header>
                <h1>"Inventory"</h1>
            </header>

            <main>
                <form class="add-item" on:submit=on_submit>
                    <input type="text" placeholder="Item name" required
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))/>
                    <input type="datetime-local" required
                        prop:value=move || added_date_time.get()
                        on:input=move |ev| added_date_time.set(event_target_value(&ev))/>
                    <input type="number" step="0.01" min="0" placeholder="Cost price" required
                        prop:value=move || cost_price.get()
                        on:input=move |ev| cost_price.set(event_target_value(&ev))/>
                    <input type="number" step="0.01" min="0" placeholder="Selling price" required
                        prop:value=move || selling_price.get()
                        on:input=move |ev| selling_price.set(event_target_value(&ev))/>
                    <input type="number" step="1" min="0" placeholder="Quantity" required
                        prop:value=move || quantity.get()
                        on:input=move |ev| quantity.set(event_target_value(&ev))/>
                    <button type="submit">"Add Item"</button>
                </form>

                <input type="text" class="search" placeholder="Search items..."
                    on:input=move |ev| set_search.set(event_target_value(&ev).to_lowercase())/>

                <table>
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Added"</th>
                            <th>"Cost Price"</th>
                            <th>"Selling Price"</th>
                            <th>"Quantity"</th>
                            <th>"Total Cost"</th>
                            <th>"Profit"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            rows.get()
                                .into_iter()
                                .map(|row| {
                                    view! {
                                        <InventoryRow row=row shell=shell.clone() set_version=set_version/>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>

                <div class="summary">
                    <p>"Total Inventory Cost: " <span>{move || summary.get().total_cost}</span></p>
                    <p>"Total Profit: " <span>{move || summary.get().total_profit}</span></p>
                </div>
            </main>
        </div>
    }
}

/// One item with its sell/update/delete actions.
#[component]
fn InventoryRow(row: ItemRow, shell: Shell, set_version: WriteSignal<u64>) -> impl IntoView {
    let id = row.id;
    let changed = move || set_version.update(|v| *v += 1);

    let sell_shell = shell.clone();
    let on_sell = move |_: ev::MouseEvent| {
        let raw = prompt("Enter quantity to sell:", "").unwrap_or_default();
        let result = sell_shell.borrow_mut().sell(id, &raw);
        match result {
            Ok(notice) => {
                changed();
                alert(&notice.to_string());
            }
            Err(e) => alert(&e.user_message()),
        }
    };

    let update_shell = shell.clone();
    let on_update = move |_: ev::MouseEvent| {
        let current = update_shell.borrow().edit_defaults(id);
        let Some(current) = current else {
            return;
        };
        let ask = |message: &str, default: &str| prompt(message, default).unwrap_or_default();
        let form = EditItemForm {
            name: ask("Enter new item name:", &current.name),
            cost_price: ask("Enter new cost price:", &current.cost_price),
            selling_price: ask("Enter new selling price:", &current.selling_price),
            quantity: ask("Enter new quantity:", &current.quantity),
            added_date_time: ask(
                "Enter new date and time (YYYY-MM-DDTHH:mm):",
                &current.added_date_time,
            ),
        };
        let result = update_shell.borrow_mut().update(id, &form);
        match result {
            Ok(notice) => {
                changed();
                alert(&notice.to_string());
            }
            Err(e) => alert(&e.user_message()),
        }
    };

    let delete_shell = shell;
    let on_delete = move |_: ev::MouseEvent| {
        let confirmed = confirm("Are you sure you want to delete this item?");
        let result = delete_shell.borrow_mut().delete(id, confirmed);
        match result {
            Ok(Some(notice)) => {
                changed();
                alert(&notice.to_string());
            }
            Ok(None) => {}
            Err(e) => alert(&e.user_message()),
        }
    };

    view! {
        <tr>
            <td>{row.name}</td>
            <td>{row.added_date_time}</td>
            <td>{row.cost_price}</td>
            <td>{row.selling_price}</td>
            <td>{row.quantity}</td>
            <td>{row.total_cost}</td>
            <td>{row.profit}</td>
            <td>
                <button on:click=on_sell>"Sell"</button>
                <button on:click=on_update>"Update"</button>
                <button on:click=on_delete>"Delete"</button>
            </td>
        </tr>
    }
}
