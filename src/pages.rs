//! Server-rendered HTML for the web route group.

use crate::models::Car;
use crate::APP_TITLE;
use htmlescape::encode_minimal as escape_html;

fn layout(heading: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
</head>
<body>
<h1>{heading}</h1>
{body}
</body>
</html>
"#,
        title = escape_html(APP_TITLE),
        heading = escape_html(heading),
        body = body,
    )
}

pub fn home() -> String {
    layout(
        "Find a car",
        r#"<form method="post" action="/search">
<label>Size <select name="size">
<option value="s">Small</option>
<option value="m">Medium</option>
<option value="l">Large</option>
</select></label>
<label>Doors <input type="number" name="doors" min="1" value="2"></label>
<button type="submit">Search</button>
</form>"#,
    )
}

pub fn search_results(cars: &[Car]) -> String {
    if cars.is_empty() {
        return layout("Search results", "<p>No cars match your search.</p>");
    }
    let mut rows = String::new();
    for car in cars {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            car.id,
            escape_html(&car.size),
            escape_html(car.fuel.as_deref().unwrap_or("")),
            car.doors,
            escape_html(car.transmission.as_deref().unwrap_or("")),
        ));
    }
    layout(
        "Search results",
        &format!(
            "<table>\n<tr><th>Id</th><th>Size</th><th>Fuel</th><th>Doors</th><th>Transmission</th></tr>\n{}</table>\n<p><a href=\"/\">New search</a></p>",
            rows
        ),
    )
}
