//! Storefront commands: browsing, cart, checkout, orders, chat.

use rust_decimal::Decimal;

use orchard_client::api::{GuestMessage, NewMessage, NewOrder, ProductQuery};
use orchard_core::{
    Message, Order, OrderId, ProductId, Role, ShippingAddress, catalog, orders, shipping,
};

use super::{CommandError, Context};

pub async fn products(
    ctx: &Context,
    category: Option<String>,
    featured: bool,
    search: Option<String>,
) -> Result<(), CommandError> {
    let query = ProductQuery {
        category,
        featured,
        search,
    };
    let products = ctx.client.products(&query).await?;
    if products.is_empty() {
        println!("No products found");
        return Ok(());
    }

    for product in products {
        let stock = if product.stock == 0 {
            "out of stock".to_owned()
        } else {
            format!("{} in stock", product.stock)
        };
        println!(
            "{}  {}  {}  [{}]  {}",
            product.id, product.name, product.price, product.category, stock
        );
    }
    Ok(())
}

pub async fn product(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let product = ctx.client.product(&ProductId::new(id)).await?;
    println!("{}", product.name);
    println!("  price:    {}", product.price);
    println!("  category: {}", product.category);
    println!("  stock:    {}", product.stock);
    if product.featured {
        println!("  featured");
    }
    if let Some(url) = ctx.client.product_image_url(&product.image) {
        println!("  image:    {url}");
    }
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }
    Ok(())
}

pub async fn categories(ctx: &Context) -> Result<(), CommandError> {
    let categories = ctx.client.categories().await?;
    let products = ctx.client.products(&ProductQuery::default()).await?;

    for (name, count) in catalog::count_by_category(&products, &categories) {
        println!("{name}  ({count})");
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Cart
// ─────────────────────────────────────────────────────────────────────────

pub async fn cart_show(ctx: &Context) -> Result<(), CommandError> {
    let cart = ctx.cart().await;
    let Some(snapshot) = cart.snapshot() else {
        println!("Cart is empty");
        return Ok(());
    };
    if snapshot.is_empty() {
        println!("Cart is empty");
        return Ok(());
    }

    for item in &snapshot.items {
        println!(
            "{}  {} x{}  = {}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.line_total()
        );
    }

    let subtotal = snapshot.subtotal();
    let shipping_cost = shipping::cost(subtotal);
    println!("\nSubtotal: {subtotal}");
    if shipping_cost == Decimal::ZERO {
        println!("Shipping: FREE");
    } else {
        println!("Shipping: {shipping_cost}");
        if let Some(remaining) = shipping::remaining_for_free_shipping(subtotal) {
            println!("Add {remaining} more for free shipping");
        }
    }
    println!("Total:    {}", shipping::total_with_shipping(subtotal));
    Ok(())
}

pub async fn cart_add(ctx: &Context, product_id: &str, quantity: u32) -> Result<(), CommandError> {
    let cart = ctx.cart().await;
    cart.add(&ProductId::new(product_id), quantity).await?;
    println!("Cart now holds {} item(s)", cart.count());
    Ok(())
}

pub async fn cart_update(
    ctx: &Context,
    product_id: &str,
    quantity: u32,
) -> Result<(), CommandError> {
    let cart = ctx.cart().await;
    cart.update_item(&ProductId::new(product_id), quantity)
        .await?;
    println!("Cart now holds {} item(s)", cart.count());
    Ok(())
}

pub async fn cart_remove(ctx: &Context, product_id: &str) -> Result<(), CommandError> {
    let cart = ctx.cart().await;
    cart.remove(&ProductId::new(product_id)).await?;
    Ok(())
}

pub async fn cart_clear(ctx: &Context) -> Result<(), CommandError> {
    let cart = ctx.cart().await;
    cart.clear().await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Checkout and orders
// ─────────────────────────────────────────────────────────────────────────

pub async fn checkout(
    ctx: &Context,
    shipping_address: ShippingAddress,
    payment_method: Option<String>,
) -> Result<(), CommandError> {
    ctx.require_login("please login to check out")?;

    let order = ctx
        .client
        .create_order(&NewOrder {
            shipping_address,
            payment_method,
        })
        .await?;
    println!("Order placed: {}", order.id);
    println!("Total: {} ({})", order.total, order.status);
    Ok(())
}

fn print_order_line(order: &Order, role: Role) {
    let cancellable = if orders::can_cancel(role, order.status) {
        "  (cancellable)"
    } else {
        ""
    };
    println!(
        "{}  {}  {} item(s)  {}{}",
        order.id,
        order.status,
        order.items.len(),
        order.total,
        cancellable
    );
}

pub async fn orders_list(ctx: &Context) -> Result<(), CommandError> {
    ctx.require_login("please login to see your orders")?;

    let orders = ctx.client.my_orders().await?;
    if orders.is_empty() {
        println!("No orders yet");
        return Ok(());
    }
    for order in &orders {
        print_order_line(order, Role::Buyer);
    }
    Ok(())
}

pub async fn order_show(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let order = ctx.client.order(&OrderId::new(id)).await?;
    println!("Order {}", order.id);
    println!("  status:  {}", order.status);
    println!("  payment: {}", order.payment_status);
    for item in &order.items {
        println!("  {} x{}  = {}", item.name, item.quantity, item.price);
    }
    println!("  total:   {}", order.total);
    let address = &order.shipping_address;
    println!(
        "  ship to: {}, {}, {} {}, {}",
        address.full_name, address.address, address.city, address.postal_code, address.country
    );
    Ok(())
}

pub async fn order_cancel(ctx: &Context, id: &str) -> Result<(), CommandError> {
    let order = ctx.client.cancel_order(&OrderId::new(id)).await?;
    println!("Order {} is now {}", order.id, order.status);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Chat
// ─────────────────────────────────────────────────────────────────────────

fn print_message(message: &Message) {
    let from = if message.is_admin {
        "support"
    } else if message.sender_name.is_empty() {
        "you"
    } else {
        &message.sender_name
    };
    println!("[{from}] {}", message.text);
}

pub async fn chat_guest(
    ctx: &Context,
    name: &str,
    email: &str,
    text: &str,
) -> Result<(), CommandError> {
    let message = ctx
        .client
        .send_guest_message(&GuestMessage {
            text: text.to_owned(),
            guest_name: name.to_owned(),
            guest_email: email.to_owned(),
        })
        .await?;
    println!("Sent (conversation {})", message.conversation_id);
    Ok(())
}

pub async fn chat_history(ctx: &Context, email: &str) -> Result<(), CommandError> {
    let messages = ctx.client.guest_messages(email).await?;
    if messages.is_empty() {
        println!("No messages for {email}");
        return Ok(());
    }
    for message in &messages {
        print_message(message);
    }
    Ok(())
}

pub async fn chat_send(ctx: &Context, text: &str) -> Result<(), CommandError> {
    ctx.require_login("please login to chat, or use `chat guest`")?;

    let message = ctx
        .client
        .send_message(&NewMessage {
            text: text.to_owned(),
            conversation_id: None,
            is_admin_reply: None,
        })
        .await?;
    println!("Sent (conversation {})", message.conversation_id);
    Ok(())
}
