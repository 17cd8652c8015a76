/// Public parsing entrypoints.
///
/// [`parse_module`] is the main forward-parse API. The `*_fragment`
/// entrypoints replay a single production against a token window; the
/// completion engine uses them to disambiguate backward scans (a fragment
/// that consumes the *entire* window means the cursor sits after a complete
/// construct, a partial consumption means the cursor is inside one).

/// Parse a whole token stream into a module tree plus symbol tables.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_module(tokens: &[Token]) -> ModuleParse {
    if tokens.is_empty() {
        return ModuleParse {
            ast: Ast::new(),
            root: None,
            diagnostics: Vec::new(),
        };
    }
    let mut parser = Parser::new(tokens);
    let root = parser.parse_whole_module();
    parser.into_module_parse(Some(root))
}

/// Replay a `DEFINE` statement against a token window.
pub fn parse_define_fragment(tokens: &[Token]) -> FragmentParse {
    parse_fragment(tokens, |p| {
        if !p.check_keyword(KeywordId::Define) {
            return None;
        }
        let (node, _) = p.parse_define(Access::Public, &[]);
        Some(node)
    })
}

/// Replay a `TYPE` definition statement against a token window.
pub fn parse_type_def_fragment(tokens: &[Token]) -> FragmentParse {
    parse_fragment(tokens, |p| {
        if !p.check_keyword(KeywordId::TypeKw) {
            return None;
        }
        let (node, _) = p.parse_type_def(Access::Public, &[]);
        Some(node)
    })
}

/// Replay a `CONSTANT` definition statement against a token window.
pub fn parse_constant_fragment(tokens: &[Token]) -> FragmentParse {
    parse_fragment(tokens, |p| {
        if !p.check_keyword(KeywordId::Constant) {
            return None;
        }
        let (node, _) = p.parse_constant_def(Access::Public, &[]);
        Some(node)
    })
}

/// Replay one expression against a token window.
pub fn parse_expression_fragment(tokens: &[Token]) -> FragmentParse {
    parse_fragment(tokens, |p| p.try_parse_expression(&[]))
}

/// Replay one variable reference (`rec.field[i]`) against a token window.
pub fn parse_variable_reference_fragment(tokens: &[Token]) -> FragmentParse {
    parse_fragment(tokens, |p| {
        if !matches!(p.peek().kind, TokenKind::Ident(_)) {
            return None;
        }
        Some(p.parse_name_expression())
    })
}

fn parse_fragment<'t>(
    tokens: &'t [Token],
    production: impl FnOnce(&mut Parser<'t>) -> Option<NodeId>,
) -> FragmentParse {
    if tokens.is_empty() {
        return FragmentParse {
            ast: Ast::new(),
            node: None,
            consumed: 0,
            complete: false,
            diagnostics: Vec::new(),
        };
    }
    let mut parser = Parser::new(tokens);
    parser.skip_newlines();
    let node = production(&mut parser);
    parser.into_fragment_parse(node)
}
