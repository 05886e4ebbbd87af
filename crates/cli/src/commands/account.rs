//! Account commands: session lifecycle and the local wishlist.

use orchard_core::ProductId;

use super::{CommandError, Context};

fn password_or_env(password: Option<String>) -> Result<String, CommandError> {
    match password {
        Some(password) => Ok(password),
        None => std::env::var("ORCHARD_PASSWORD")
            .map_err(|_| CommandError::Failed("pass --password or set ORCHARD_PASSWORD")),
    }
}

pub async fn login(
    ctx: &Context,
    username: &str,
    password: Option<String>,
) -> Result<(), CommandError> {
    let password = password_or_env(password)?;
    if ctx.session.login(username, &password).await {
        Ok(())
    } else {
        Err(CommandError::Failed("login failed"))
    }
}

pub async fn signup(
    ctx: &Context,
    username: &str,
    email: &str,
    password: Option<String>,
) -> Result<(), CommandError> {
    let password = password_or_env(password)?;
    if ctx.session.signup(username, email, &password).await {
        Ok(())
    } else {
        Err(CommandError::Failed("signup failed"))
    }
}

pub async fn logout(ctx: &Context) -> Result<(), CommandError> {
    ctx.session.logout().await;
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<(), CommandError> {
    match ctx.session.current_user() {
        Some(user) => println!("{} <{}> ({})", user.username, user.email, user.role),
        None => println!("Not logged in"),
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────
// Wishlist
// ─────────────────────────────────────────────────────────────────────────

pub async fn wishlist_list(ctx: &Context) -> Result<(), CommandError> {
    let ids = ctx.session.store().wishlist();
    if ids.is_empty() {
        println!("Wishlist is empty");
        return Ok(());
    }

    for id in ids {
        // Wishlisted products can vanish server-side; show what survives.
        match ctx.client.product(&id).await {
            Ok(product) => println!("{}  {}  {}", product.id, product.name, product.price),
            Err(error) => {
                tracing::debug!(%error, product = %id, "wishlisted product not fetchable");
                println!("{id}  (no longer available)");
            }
        }
    }
    Ok(())
}

pub async fn wishlist_add(ctx: &Context, product_id: &str) -> Result<(), CommandError> {
    ctx.require_login("please login to use the wishlist")?;

    // Reject IDs that do not resolve to a product.
    let product = ctx.client.product(&ProductId::new(product_id)).await?;
    ctx.session.store().wishlist_add(product.id.clone())?;
    println!("Added {} to wishlist", product.name);
    Ok(())
}

pub fn wishlist_remove(ctx: &Context, product_id: &str) -> Result<(), CommandError> {
    let id = ProductId::new(product_id);
    if !ctx.session.store().wishlist_contains(&id) {
        return Err(CommandError::Failed("product is not on the wishlist"));
    }
    ctx.session.store().wishlist_remove(&id)?;
    println!("Removed from wishlist");
    Ok(())
}
