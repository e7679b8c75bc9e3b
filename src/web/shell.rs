//! Application shell: the provider stack every page renders inside.
//!
//! ```text
//! WalletProvider (network + chain id context)
//!   └─ StyleProvider (theme variables)
//!        └─ Layout (header, nav, footer)
//!             └─ Page
//! ```

use crate::config::ProjectConfig;
use crate::web::provider::Web3Library;

/// Data available to wrappers and pages while rendering.
pub struct RenderContext<'a> {
    pub library: &'a Web3Library,
    pub config: &'a ProjectConfig,
    pub connected: bool,
}

/// A renderable page.
pub trait Page {
    fn title(&self) -> String;
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

/// A context wrapper around rendered content.
pub trait Wrapper: Send + Sync {
    fn name(&self) -> &'static str;
    fn wrap(&self, ctx: &RenderContext<'_>, inner: String) -> String;
}

/// Exposes the network provider to everything below it.
pub struct WalletProvider;

impl Wrapper for WalletProvider {
    fn name(&self) -> &'static str {
        "wallet"
    }

    fn wrap(&self, ctx: &RenderContext<'_>, inner: String) -> String {
        format!(
            r#"<div data-provider="wallet" data-network="{}" data-chain-id="{}" data-connected="{}">{}</div>"#,
            escape(ctx.library.network()),
            ctx.library.chain_id(),
            ctx.connected,
            inner
        )
    }
}

/// Colour and spacing tokens.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: &'static str,
    pub foreground: &'static str,
    pub accent: &'static str,
    pub font: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff",
            foreground: "#1a202c",
            accent: "#805ad5",
            font: "system-ui, sans-serif",
        }
    }
}

/// Applies a [`Theme`] as CSS custom properties.
#[derive(Default)]
pub struct StyleProvider {
    pub theme: Theme,
}

impl Wrapper for StyleProvider {
    fn name(&self) -> &'static str {
        "style"
    }

    fn wrap(&self, _ctx: &RenderContext<'_>, inner: String) -> String {
        let t = &self.theme;
        format!(
            r#"<div data-provider="style" style="--bg: {}; --fg: {}; --accent: {}; font-family: {}; background: var(--bg); color: var(--fg);">{}</div>"#,
            t.background, t.foreground, t.accent, t.font, inner
        )
    }
}

/// Header, navigation and footer around the page body.
pub struct Layout;

impl Wrapper for Layout {
    fn name(&self) -> &'static str {
        "layout"
    }

    fn wrap(&self, ctx: &RenderContext<'_>, inner: String) -> String {
        let status = if ctx.connected { "connected" } else { "disconnected" };
        format!(
            concat!(
                r#"<div data-provider="layout">"#,
                r#"<header><strong>Buddha Market</strong> <nav><a href="/">Home</a> <a href="/api/abi/erc721">ABI</a></nav>"#,
                r#" <span class="network">{} ({})</span></header>"#,
                "<main>{}</main>",
                "<footer>solidity {}</footer>",
                "</div>"
            ),
            escape(ctx.library.network()),
            status,
            inner,
            escape(&ctx.config.solidity)
        )
    }
}

/// The fixed wrapper stack.
pub struct AppShell {
    wrappers: Vec<Box<dyn Wrapper>>,
}

impl AppShell {
    pub fn new() -> Self {
        Self {
            wrappers: vec![
                Box::new(WalletProvider),
                Box::new(StyleProvider::default()),
                Box::new(Layout),
            ],
        }
    }

    /// Wrapper names, outermost first.
    pub fn wrapper_names(&self) -> Vec<&'static str> {
        self.wrappers.iter().map(|w| w.name()).collect()
    }

    /// Render `page` once and wrap it, innermost wrapper first.
    pub fn render(&self, page: &dyn Page, ctx: &RenderContext<'_>) -> String {
        let body = self
            .wrappers
            .iter()
            .rev()
            .fold(page.render(ctx), |inner, wrapper| wrapper.wrap(ctx, inner));

        format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title></head><body>{}</body></html>",
            escape(&page.title()),
            body
        )
    }
}

impl Default for AppShell {
    fn default() -> Self {
        Self::new()
    }
}

/// Minimal HTML escaping for text and attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
