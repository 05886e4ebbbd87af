//! Admin console commands.
//!
//! Authorization is enforced server-side; these commands simply forward
//! the stored token and surface whatever the API answers.

use orchard_client::api::{NewMessage, SliderForm};
use orchard_core::{
    CategoryId, ConversationId, OrderId, OrderStatus, SliderId, UserId, orders,
};

use super::{CommandError, Context};

pub async fn orders(
    ctx: &Context,
    status: Option<OrderStatus>,
    page: Option<u32>,
    limit: Option<u32>,
) -> Result<(), CommandError> {
    let listing = ctx.client.orders(status, page, limit).await?;
    for order in &listing.orders {
        println!(
            "{}  {}  {}  {}",
            order.id,
            order.status,
            order.total,
            order.user.id()
        );
    }
    println!(
        "\nPage {}/{} ({} total)",
        listing.current_page, listing.total_pages, listing.total
    );
    Ok(())
}

pub async fn order_status(
    ctx: &Context,
    id: &str,
    status: OrderStatus,
) -> Result<(), CommandError> {
    let order = ctx
        .client
        .update_order_status(&OrderId::new(id), status)
        .await?;
    println!("Order {} is now {}", order.id, order.status);
    if !orders::can_update_status(order.status) {
        println!("Status is final");
    }
    Ok(())
}

pub async fn cancel(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let order = ctx.client.admin_cancel_order(&OrderId::new(id)).await?;
    println!("Order {} is now {}", order.id, order.status);
    Ok(())
}

pub async fn stats(ctx: &Context) -> Result<(), CommandError> {
    let stats = ctx.client.order_stats().await?;
    println!("Orders:  {}", stats.total_orders);
    println!("Pending: {}", stats.pending_orders);
    println!("Revenue: {}", stats.total_revenue);
    if !stats.recent_orders.is_empty() {
        println!("\nRecent:");
        for order in &stats.recent_orders {
            println!("  {}  {}  {}", order.id, order.status, order.total);
        }
    }
    Ok(())
}

pub async fn cleanup(ctx: &Context) -> Result<(), CommandError> {
    let result = ctx.client.cleanup_orders().await?;
    println!("{} ({} deleted)", result.message, result.deleted_count);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────

pub async fn users(ctx: &Context) -> Result<(), CommandError> {
    for user in ctx.client.users().await? {
        println!("{}  {}  <{}>  {}", user.id, user.username, user.email, user.role);
    }
    Ok(())
}

pub async fn delete_user(ctx: &Context, id: &str) -> Result<(), CommandError> {
    ctx.client.delete_user(&UserId::new(id)).await?;
    println!("User deleted");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────

pub async fn categories(ctx: &Context) -> Result<(), CommandError> {
    for category in ctx.client.categories().await? {
        println!("{}  {}  {}", category.id, category.name, category.description);
    }
    Ok(())
}

pub async fn category_add(
    ctx: &Context,
    name: &str,
    description: &str,
) -> Result<(), CommandError> {
    let category = ctx.client.create_category(name, description).await?;
    println!("Created category {} ({})", category.name, category.id);
    Ok(())
}

pub async fn category_update(
    ctx: &Context,
    id: &str,
    name: &str,
    description: &str,
) -> Result<(), CommandError> {
    let category = ctx
        .client
        .update_category(&CategoryId::new(id), name, description)
        .await?;
    println!("Updated category {}", category.name);
    Ok(())
}

pub async fn category_delete(ctx: &Context, id: &str) -> Result<(), CommandError> {
    ctx.client.delete_category(&CategoryId::new(id)).await?;
    println!("Category deleted");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Sliders
// ─────────────────────────────────────────────────────────────────────────

pub async fn sliders(ctx: &Context) -> Result<(), CommandError> {
    for slider in ctx.client.sliders().await? {
        let state = if slider.active { "active" } else { "inactive" };
        println!("{}  #{}  {}  [{}]", slider.id, slider.order, slider.title, state);
    }
    Ok(())
}

pub async fn slider_add(
    ctx: &Context,
    title: String,
    description: String,
    button_text: String,
    button_link: String,
    order: u32,
) -> Result<(), CommandError> {
    let slider = ctx
        .client
        .create_slider(SliderForm {
            title,
            description,
            button_text,
            button_link,
            active: true,
            order,
            image: None,
        })
        .await?;
    println!("Created slider {} ({})", slider.title, slider.id);
    Ok(())
}

pub async fn slider_delete(ctx: &Context, id: &str) -> Result<(), CommandError> {
    ctx.client.delete_slider(&SliderId::new(id)).await?;
    println!("Slider deleted");
    Ok(())
}

pub async fn slider_order(ctx: &Context, id: &str, order: u32) -> Result<(), CommandError> {
    let slider = ctx
        .client
        .update_slider_order(&SliderId::new(id), order)
        .await?;
    println!("Slider {} is now at position {}", slider.title, slider.order);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Chat inbox
// ─────────────────────────────────────────────────────────────────────────

pub async fn conversations(ctx: &Context) -> Result<(), CommandError> {
    let conversations = ctx.client.conversations().await?;
    if conversations.is_empty() {
        println!("Inbox is empty");
        return Ok(());
    }
    for conversation in &conversations {
        let last = &conversation.last_message;
        let from = if last.sender_name.is_empty() {
            last.sender_email.as_str()
        } else {
            last.sender_name.as_str()
        };
        println!(
            "{}  ({} message(s))  {}: {}",
            conversation.id, conversation.message_count, from, last.text
        );
    }
    Ok(())
}

pub async fn messages(ctx: &Context, id: &str) -> Result<(), CommandError> {
    for message in ctx
        .client
        .conversation_messages(&ConversationId::new(id))
        .await?
    {
        let from = if message.is_admin {
            "support"
        } else if message.sender_name.is_empty() {
            message.sender_email.as_str()
        } else {
            message.sender_name.as_str()
        };
        println!("[{from}] {}", message.text);
    }
    Ok(())
}

pub async fn reply(ctx: &Context, id: &str, text: &str) -> Result<(), CommandError> {
    ctx.client
        .send_message(&NewMessage {
            text: text.to_owned(),
            conversation_id: Some(ConversationId::new(id)),
            is_admin_reply: Some(true),
        })
        .await?;
    println!("Reply sent");
    Ok(())
}

pub async fn delete_conversation(ctx: &Context, id: &str) -> Result<(), CommandError> {
    ctx.client
        .delete_conversation(&ConversationId::new(id))
        .await?;
    println!("Conversation deleted");
    Ok(())
}
