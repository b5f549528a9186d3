//! Page fragments for the result and error pages.

use crate::cgi::context::RequestContext;
use crate::config::ResponseConfig;

/// Opening of the result page, up to and including the `<pre>` that holds
/// the converted document.
pub fn result_header(config: &ResponseConfig, encoding: Option<&str>) -> String {
    let mut page = String::from("<?xml version=\"1.0\"");
    if let Some(encoding) = encoding {
        page.push_str(&format!(" encoding=\"{}\"", escape_text(encoding)));
    }
    page.push_str("?>\n\n");

    page.push_str(
        "<!DOCTYPE html\n   PUBLIC \"-//W3C//DTD XHTML 1.0 Strict//EN\"\n   \
         \"http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd\">\n\n",
    );

    page.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\">\n  <head>\n");
    page.push_str(&format!("    <title>{}</title>\n", escape_text(&config.title)));
    if let Some(href) = &config.stylesheet_href {
        page.push_str(&format!(
            "    <link type=\"text/css\" href=\"{}\" rel=\"stylesheet\"/>\n",
            escape_text(href)
        ));
    }
    page.push_str("  </head>\n  <body>\n");

    if let Some(href) = &config.home_href {
        page.push_str(&format!(
            "    <p class=\"navigation\"><a href=\"{}\">back to main page</a></p>\n",
            escape_text(href)
        ));
    }

    page.push_str(
        "    <div class=\"title\">\n      <h1>Conversion result</h1>\n    </div>\n    \
         <p>The input document has been converted to XHTML. Copy the text below\n      \
         into an editor to save it.</p>\n    \
         <pre class=\"document\" xml:space=\"preserve\">\n",
    );
    page
}

/// Closing of the result page.
pub fn result_footer(ctx: &RequestContext, config: &ResponseConfig) -> String {
    let mut page = String::from("</pre>\n");
    page.push_str(&format!(
        "    <p class=\"boxed\"><i>{} {}</i></p>\n",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    if config.debug {
        page.push_str(&debug_state(ctx));
    }
    page.push_str("  </body>\n</html>\n");
    page
}

/// Complete error page with a single heading and optional detail paragraphs.
pub fn error_page(ctx: &RequestContext, config: &ResponseConfig, heading: &str, details: &[String]) -> String {
    let mut page = format!(
        "<html><head><title>{} - error</title></head><body><h1>{}</h1>",
        env!("CARGO_PKG_NAME"),
        escape_text(heading)
    );
    for detail in details {
        page.push_str(&format!("<p>{}</p>", escape_text(detail)));
    }
    if config.debug {
        page.push_str(&debug_state(ctx));
    }
    page.push_str("</body></html>");
    page
}

/// Internal state list appended in debug mode.
pub fn debug_state(ctx: &RequestContext) -> String {
    let settings = &ctx.settings;
    format!(
        "<hr/><p>Internal state:</p><ul>\
         <li>Request status: {}</li>\
         <li>HTML output: {}</li>\
         <li>Doctype: {}</li>\
         <li>Tab length: {}</li>\
         <li>Line length: {}</li>\
         </ul>",
        ctx.status,
        settings.html_output,
        settings
            .doctype
            .map_or_else(|| "auto".to_string(), |i| i.to_string()),
        settings.tab_length,
        settings.line_length,
    )
}

/// Escape markup characters in text.
pub fn escape_text(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    escape_bytes(text.as_bytes(), &mut out);
    // Only ASCII bytes are replaced, so the result stays valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}

/// Escape markup characters in raw document bytes, leaving other bytes as-is.
pub fn escape_bytes(input: &[u8], out: &mut Vec<u8>) {
    for &b in input {
        match b {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            _ => out.push(b),
        }
    }
}
