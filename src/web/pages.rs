//! Pages rendered inside the application shell.

use crate::abi::ERC721_ABI;
use crate::web::shell::{escape, Page, RenderContext};

/// Landing page: deployment plan and the token interface.
pub struct IndexPage;

impl Page for IndexPage {
    fn title(&self) -> String {
        "Buddha Market".to_string()
    }

    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let contracts: String = ctx
            .config
            .deploy
            .contracts
            .iter()
            .map(|c| {
                let args = c.args.iter().map(|a| escape(a)).collect::<Vec<_>>().join(", ");
                format!("<li><code>{}({})</code></li>", escape(&c.name), args)
            })
            .collect();

        let signatures: String = ERC721_ABI
            .iter()
            .map(|s| format!("<li><code>{}</code></li>", escape(s)))
            .collect();

        format!(
            "<section id=\"contracts\"><h2>Contracts</h2><ul>{contracts}</ul></section>\
             <section id=\"erc721\"><h2>ERC-721 interface</h2><ul>{signatures}</ul></section>"
        )
    }
}

/// Shown for unknown paths.
pub struct NotFoundPage {
    pub path: String,
}

impl Page for NotFoundPage {
    fn title(&self) -> String {
        "Not found".to_string()
    }

    fn render(&self, _ctx: &RenderContext<'_>) -> String {
        format!("<h2>Not found</h2><p>No page at <code>{}</code>.</p>", escape(&self.path))
    }
}
