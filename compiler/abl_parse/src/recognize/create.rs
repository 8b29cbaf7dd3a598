//! `CREATE object handle [IN WIDGET-POOL pool] [ASSIGN ...]`
//!
//! Only dynamic objects name a handle; `CREATE Customer.` creates a record
//! and `CREATE WIDGET-POOL` names a pool, so both yield nothing.

use abl_ir::keyword::Keyword;
use abl_ir::{ItemKind, ParseFlags, TokenKind};

use crate::context::ParseContext;
use crate::cursor::{Lexeme, TokenCursor};

const WIDGETS: &[Keyword] = &[
    Keyword::full("BUTTON"),
    Keyword::full("BROWSE"),
    Keyword::full("COMBO-BOX"),
    Keyword::full("CONTROL-FRAME"),
    Keyword::full("DIALOG-BOX"),
    Keyword::full("EDITOR"),
    Keyword::full("FIELD-GROUP"),
    Keyword::full("FILL-IN"),
    Keyword::full("FRAME"),
    Keyword::full("IMAGE"),
    Keyword::full("MENU"),
    Keyword::full("MENU-ITEM"),
    Keyword::full("RADIO-SET"),
    Keyword::full("RECTANGLE"),
    Keyword::full("SELECTION-LIST"),
    Keyword::full("SLIDER"),
    Keyword::full("SUB-MENU"),
    Keyword::full("TEXT"),
    Keyword::full("TOGGLE-BOX"),
    Keyword::full("WINDOW"),
];

/// Handle-based objects that are not widgets.
const OBJECTS: &[Keyword] = &[
    Keyword::full("BUFFER"),
    Keyword::full("CALL"),
    Keyword::full("CLIENT-PRINCIPAL"),
    Keyword::full("DATASET"),
    Keyword::full("DATA-SOURCE"),
    Keyword::full("QUERY"),
    Keyword::full("SAX-ATTRIBUTES"),
    Keyword::full("SAX-READER"),
    Keyword::full("SAX-WRITER"),
    Keyword::full("SERVER"),
    Keyword::full("SERVER-SOCKET"),
    Keyword::full("SOAP-HEADER"),
    Keyword::full("SOAP-HEADER-ENTRY"),
    Keyword::full("SOCKET"),
    Keyword::full("TEMP-TABLE"),
    Keyword::full("X-DOCUMENT"),
    Keyword::full("X-NODEREF"),
];

/// Recognize a CREATE statement. The cursor sits after `CREATE`.
pub(crate) fn recognize(cursor: &mut TokenCursor<'_>, ctx: &mut ParseContext, at: &Lexeme<'_>) {
    let Some(object) = cursor.bump() else {
        return;
    };
    let widget = WIDGETS.iter().find(|w| object.is_keyword(**w));
    let Some(kind) = widget.or_else(|| OBJECTS.iter().find(|o| object.is_keyword(**o))) else {
        return;
    };
    let Some(handle) = cursor.bump().filter(|l| l.kind == TokenKind::Word) else {
        return;
    };

    let kind = if widget.is_some() {
        ItemKind::Widget {
            widget_type: kind.name().to_owned(),
        }
    } else {
        ItemKind::Variable {
            data_type: kind.name().to_owned(),
            primitive: false,
        }
    };
    ctx.emit(handle.text, kind, at, ParseFlags::DYNAMIC);
}
