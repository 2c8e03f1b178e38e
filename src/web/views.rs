//! Minimal server-side HTML rendering. A templating engine is deliberately
//! out of scope; pages are composed from a shared layout and per-page
//! fragments, with every user-supplied value escaped.

use crate::db::{Home, User};

fn esc(value: &str) -> String {
    html_escape::encode_text(value).into_owned()
}

fn esc_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

fn nav(is_logged_in: bool) -> String {
    let account = if is_logged_in {
        r#"<a href="/favourite-list">Favourites</a>
           <a href="/store/bookings">Bookings</a>
           <a href="/host/host-home-list">Host</a>
           <form class="inline" action="/logout" method="POST"><button type="submit">Logout</button></form>"#
            .to_string()
    } else {
        r#"<a href="/login">Login</a> <a href="/signup">Signup</a>"#.to_string()
    };

    format!(
        r#"<nav><a href="/">stayr</a> <a href="/homes">Homes</a> {account}</nav>"#
    )
}

pub fn layout(page_title: &str, is_logged_in: bool, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
{nav}
<main>
{body}
</main>
</body>
</html>"#,
        title = esc(page_title),
        nav = nav(is_logged_in),
    )
}

fn error_list(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", esc(m)))
        .collect();
    format!(r#"<ul class="errors">{items}</ul>"#)
}

pub fn login_page(old_email: &str, messages: &[String]) -> String {
    let body = format!(
        r#"<h1>Login</h1>
{errors}
<form action="/login" method="POST">
  <label>Email <input type="email" name="email" value="{email}"></label>
  <label>Password <input type="password" name="password"></label>
  <button type="submit">Login</button>
</form>
<p><a href="/signup">Create an account</a></p>"#,
        errors = error_list(messages),
        email = esc_attr(old_email),
    );
    layout("Login", false, &body)
}

/// Non-password fields echoed back into the signup form on failure.
#[derive(Debug, Default)]
pub struct SignupOldInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_type: String,
}

pub fn signup_page(old: &SignupOldInput, messages: &[String]) -> String {
    let guest_selected = if old.user_type == "guest" { " checked" } else { "" };
    let host_selected = if old.user_type == "host" { " checked" } else { "" };

    let body = format!(
        r#"<h1>Sign Up</h1>
{errors}
<form action="/Signup" method="POST">
  <label>First Name <input type="text" name="firstName" value="{first_name}"></label>
  <label>Last Name <input type="text" name="lastName" value="{last_name}"></label>
  <label>Email <input type="email" name="email" value="{email}"></label>
  <label>Password <input type="password" name="password"></label>
  <label>Confirm Password <input type="password" name="confirm_password"></label>
  <label><input type="radio" name="userType" value="guest"{guest_selected}> Guest</label>
  <label><input type="radio" name="userType" value="host"{host_selected}> Host</label>
  <label><input type="checkbox" name="terms"> I accept the terms and conditions</label>
  <button type="submit">Sign Up</button>
</form>"#,
        errors = error_list(messages),
        first_name = esc_attr(&old.first_name),
        last_name = esc_attr(&old.last_name),
        email = esc_attr(&old.email),
    );
    layout("Sign Up", false, &body)
}

fn home_card(home: &Home, favouritable: bool) -> String {
    let favourite_form = if favouritable {
        format!(
            r#"<form action="/favourite-list" method="POST">
  <input type="hidden" name="id" value="{id}">
  <button type="submit">Add to favourites</button>
</form>"#,
            id = home.id
        )
    } else {
        String::new()
    };

    format!(
        r#"<article class="home">
  <h2><a href="/homes/{id}">{name}</a></h2>
  <img src="/{photo}" alt="{name}">
  <p>{location} &middot; {price} per night &middot; rated {rating}</p>
  {favourite_form}
</article>"#,
        id = home.id,
        name = esc(&home.house_name),
        photo = esc_attr(&home.photo),
        location = esc(&home.location),
        price = home.price,
        rating = home.rating,
    )
}

pub fn index_page(homes: &[Home], is_logged_in: bool) -> String {
    let cards: String = homes.iter().map(|h| home_card(h, is_logged_in)).collect();
    let body = format!("<h1>Find your next stay</h1>\n{cards}");
    layout("stayr Home", is_logged_in, &body)
}

pub fn home_list_page(homes: &[Home], is_logged_in: bool) -> String {
    let cards: String = homes.iter().map(|h| home_card(h, is_logged_in)).collect();
    let body = format!("<h1>Homes List</h1>\n{cards}");
    layout("Homes List", is_logged_in, &body)
}

pub fn home_detail_page(home: &Home, is_logged_in: bool) -> String {
    let description = home
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", esc(d)))
        .unwrap_or_default();
    let rules_link = home
        .rules_document
        .as_deref()
        .map(|_| format!(r#"<p><a href="/rules/{}">House rules</a></p>"#, home.id))
        .unwrap_or_default();

    let body = format!(
        r#"<h1>{name}</h1>
<img src="/{photo}" alt="{name}">
<p>{location} &middot; {price} per night &middot; rated {rating}</p>
{description}
{rules_link}"#,
        name = esc(&home.house_name),
        photo = esc_attr(&home.photo),
        location = esc(&home.location),
        price = home.price,
        rating = home.rating,
    );
    layout("Home Detail", is_logged_in, &body)
}

pub fn rules_page(home: &Home, is_logged_in: bool) -> String {
    let rules = home.rules_document.as_deref().map_or_else(
        || "<p>No rules document uploaded for this home.</p>".to_string(),
        |path| {
            format!(
                r#"<p><a href="/{path}">View rules document</a></p>"#,
                path = esc_attr(path)
            )
        },
    );

    let body = format!(
        "<h1>House Rules - {name}</h1>\n{rules}",
        name = esc(&home.house_name),
    );
    layout(&format!("House Rules - {}", home.house_name), is_logged_in, &body)
}

pub fn favourite_list_page(homes: &[Home]) -> String {
    let cards: String = homes
        .iter()
        .map(|home| {
            format!(
                r#"<article class="home">
  <h2><a href="/homes/{id}">{name}</a></h2>
  <form action="/favourite/delete/{id}" method="POST"><button type="submit">Remove</button></form>
</article>"#,
                id = home.id,
                name = esc(&home.house_name),
            )
        })
        .collect();
    let body = format!("<h1>My Favourites</h1>\n{cards}");
    layout("My Favourites", true, &body)
}

pub fn bookings_page(is_logged_in: bool) -> String {
    layout(
        "My Bookings",
        is_logged_in,
        "<h1>My Bookings</h1>\n<p>You have no bookings yet.</p>",
    )
}

pub fn host_home_list_page(homes: &[Home], user: Option<&User>) -> String {
    let greeting = user
        .map(|u| format!("<p>Signed in as {}</p>", esc(&u.email)))
        .unwrap_or_default();
    let rows: String = homes
        .iter()
        .map(|home| {
            format!(
                r#"<article class="home">
  <h2>{name}</h2>
  <a href="/host/edit-home/{id}?editing=true">Edit</a>
  <form class="inline" action="/host/delete-home/{id}" method="POST"><button type="submit">Delete</button></form>
</article>"#,
                id = home.id,
                name = esc(&home.house_name),
            )
        })
        .collect();

    let body = format!(
        r#"<h1>Host Homes List</h1>
{greeting}
<p><a href="/host/add-home">Add a new home</a></p>
{rows}"#
    );
    layout("Host Homes List", true, &body)
}

/// Shared add/edit form. `home` present means editing.
pub fn edit_home_page(home: Option<&Home>) -> String {
    let (action, title, id_field) = match home {
        Some(home) => (
            "/host/edit-home",
            "Edit your Home",
            format!(r#"<input type="hidden" name="id" value="{}">"#, home.id),
        ),
        None => ("/host/add-home", "Add Home to stayr", String::new()),
    };

    let value = |f: fn(&Home) -> String| home.map(f).unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<form action="{action}" method="POST" enctype="multipart/form-data">
  {id_field}
  <label>House Name <input type="text" name="houseName" value="{house_name}" required></label>
  <label>Price <input type="number" name="price" step="0.01" value="{price}" required></label>
  <label>Location <input type="text" name="location" value="{location}" required></label>
  <label>Rating <input type="number" name="rating" step="0.1" value="{rating}" required></label>
  <label>Description <textarea name="description">{description}</textarea></label>
  <label>Photo <input type="file" name="photo" accept="image/png,image/jpeg"></label>
  <label>Rules Document <input type="file" name="Rulephoto" accept="image/png,image/jpeg,application/pdf"></label>
  <button type="submit">Save</button>
</form>"#,
        house_name = esc_attr(&value(|h| h.house_name.clone())),
        price = value(|h| h.price.to_string()),
        location = esc_attr(&value(|h| h.location.clone())),
        rating = value(|h| h.rating.to_string()),
        description = esc(&value(|h| h.description.clone().unwrap_or_default())),
    );
    layout(title, true, &body)
}

pub fn not_found_page(path: &str, is_logged_in: bool) -> String {
    let body = format!(
        "<h1>Page Not Found</h1>\n<p>No page exists at {}.</p>",
        esc(path)
    );
    layout("Page Not Found", is_logged_in, &body)
}

pub fn error_page(status: u16, message: &str) -> String {
    let body = format!("<h1>Error {status}</h1>\n<p>{}</p>", esc(message));
    layout("Error", false, &body)
}
