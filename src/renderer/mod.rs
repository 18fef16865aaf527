use crate::error::{AgendaError, Result};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use serde::{Deserialize, Serialize};

/// One championship and its already-formatted match lines, as supplied by
/// the frontend when requesting a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChampionshipGames {
    pub campeonato: String,
    pub jogos: Vec<String>,
}

// US letter, margins in mm.
const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 20.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;

/// Tracks the vertical write position, starting a fresh page when the
/// current one runs out of room.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
}

impl PageCursor<'_> {
    fn write_line(&mut self, text: &str, size: f32, font: &IndirectFontRef, advance: f32) {
        if self.y - advance < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "agenda");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT - MARGIN;
        }
        self.layer
            .use_text(text, size, Mm(MARGIN), Mm(self.y), font);
        self.y -= advance;
    }

    fn space(&mut self, advance: f32) {
        self.y -= advance;
    }
}

/// Renders the supplied championships into a paginated PDF: one title
/// heading, one subheading per championship, one line per match.
pub fn render_pdf(groups: &[ChampionshipGames], date: &str) -> Result<Vec<u8>> {
    let title = format!("Agenda de Jogos - {date}");
    let (doc, page, layer) = PdfDocument::new(&title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "agenda");
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AgendaError::Render(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AgendaError::Render(e.to_string()))?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        doc: &doc,
        y: PAGE_HEIGHT - MARGIN,
    };

    cursor.write_line(&title, TITLE_SIZE, &bold, 12.0);
    cursor.space(4.0);

    for group in groups {
        cursor.write_line(&group.campeonato, HEADING_SIZE, &bold, 8.0);
        for jogo in &group.jogos {
            cursor.write_line(jogo, BODY_SIZE, &regular, 6.0);
        }
        cursor.space(4.0);
    }

    doc.save_to_bytes()
        .map_err(|e| AgendaError::Render(e.to_string()))
}
