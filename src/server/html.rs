const DEMO_PAGE: &str = r#"<html>
    <head>
        <title>Simple demo-api</title>
    </head>
    <body>
        <h1>Simple demo-api: Predict language of text</h1>
        <form action="/submit" method="post">
            <label for="text">Text to predict:</label><br>
            <input type="text" id="text" name="text">
            <input type="submit" value="Predict language">
        </form>
    </body>
</html>
"#;

/// The demo form served at `/`. It posts its single `text` field to `/submit`.
pub fn demo_page() -> &'static str {
    DEMO_PAGE
}
