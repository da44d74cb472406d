//! Command handlers, one file per command.
//!
//! Each handler follows the same convention:
//! - `COMMAND` — the command name this handler responds to
//! - `Input` — the typed request payload
//! - `guard` — input validation (where the payload has required fields)
//! - `handle` — the command handler
//!
//! Role checks live in the handlers themselves: catalog edits and order
//! administration require an admin session, cart and checkout a customer
//! session, browsing none.

mod cart_add;
mod cart_count;
mod cart_remove;
mod cart_update;
mod cart_view;
mod order_create;
mod order_list;
mod order_list_all;
mod order_status;
mod product_create;
mod product_delete;
mod product_list;
mod product_update;
mod profile_update;
mod user_register;

use crate::service::Service;
use crate::store::Store;

/// Build the full storefront service: every command wired to its handler.
pub fn storefront_service<S: Store + 'static>(store: S) -> Service<S> {
    Service::new(store)
        .command(product_list::COMMAND, product_list::handle)
        .command_guarded(
            product_create::COMMAND,
            product_create::guard,
            product_create::handle,
        )
        .command_guarded(
            product_update::COMMAND,
            product_update::guard,
            product_update::handle,
        )
        .command_guarded(
            product_delete::COMMAND,
            product_delete::guard,
            product_delete::handle,
        )
        .command(cart_view::COMMAND, cart_view::handle)
        .command(cart_count::COMMAND, cart_count::handle)
        .command_guarded(cart_add::COMMAND, cart_add::guard, cart_add::handle)
        .command_guarded(cart_update::COMMAND, cart_update::guard, cart_update::handle)
        .command_guarded(cart_remove::COMMAND, cart_remove::guard, cart_remove::handle)
        .command_guarded(
            order_create::COMMAND,
            order_create::guard,
            order_create::handle,
        )
        .command(order_list::COMMAND, order_list::handle)
        .command(order_list_all::COMMAND, order_list_all::handle)
        .command_guarded(
            order_status::COMMAND,
            order_status::guard,
            order_status::handle,
        )
        .command_guarded(
            profile_update::COMMAND,
            profile_update::guard,
            profile_update::handle,
        )
        .command_guarded(
            user_register::COMMAND,
            user_register::guard,
            user_register::handle,
        )
}
