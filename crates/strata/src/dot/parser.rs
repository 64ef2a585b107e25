use super::lexer::{Lexer, Spanned, Tok};
use super::{DotAttrs, DotEdge, DotGraph};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
struct Scope {
    node_defaults: DotAttrs,
    edge_defaults: DotAttrs,
}

pub(super) struct Parser<'input> {
    input: &'input str,
    toks: Vec<Spanned>,
    pos: usize,
    graph: DotGraph,
    scopes: Vec<Scope>,
}

/// Converts a byte offset into a 1-based line and column.
fn line_column(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset.min(input.len())];
    let line = before.matches('\n').count() + 1;
    let column = before
        .rsplit('\n')
        .next()
        .map_or(0, |l| l.chars().count())
        + 1;
    (line, column)
}

impl<'input> Parser<'input> {
    pub(super) fn new(input: &'input str) -> Result<Self> {
        let toks = Lexer::new(input).tokenize().map_err(|err| {
            let (line, column) = line_column(input, err.offset);
            Error::DotParse {
                line,
                column,
                message: err.message,
            }
        })?;
        Ok(Self {
            input,
            toks,
            pos: 0,
            graph: DotGraph::default(),
            scopes: vec![Scope::default()],
        })
    }

    fn peek(&self) -> Option<&Tok> {
        self.toks.get(self.pos).map(|(_, t, _)| t)
    }

    fn peek_at(&self, ahead: usize) -> Option<&Tok> {
        self.toks.get(self.pos + ahead).map(|(_, t, _)| t)
    }

    fn bump(&mut self) -> Option<Tok> {
        let tok = self.toks.get(self.pos).map(|(_, t, _)| t.clone());
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, tok: &Tok) -> bool {
        if self.peek() == Some(tok) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        let offset = self
            .toks
            .get(self.pos)
            .map_or(self.input.len(), |(start, _, _)| *start);
        let (line, column) = line_column(self.input, offset);
        Error::DotParse {
            line,
            column,
            message: message.into(),
        }
    }

    fn unexpected(&self, wanted: &str) -> Error {
        match self.peek() {
            Some(tok) => self.error(format!("expected {wanted}, found {}", tok.describe())),
            None => self.error(format!("expected {wanted}, found end of input")),
        }
    }

    fn expect(&mut self, tok: &Tok) -> Result<()> {
        if self.eat(tok) {
            Ok(())
        } else {
            Err(self.unexpected(&tok.describe()))
        }
    }

    fn id(&mut self) -> Result<String> {
        match self.peek() {
            Some(Tok::Id(_)) => match self.bump() {
                Some(Tok::Id(id)) => Ok(id),
                _ => Err(self.unexpected("an identifier")),
            },
            _ => Err(self.unexpected("an identifier")),
        }
    }

    fn scope(&mut self) -> &mut Scope {
        if self.scopes.is_empty() {
            self.scopes.push(Scope::default());
        }
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub(super) fn parse(mut self) -> Result<DotGraph> {
        self.graph.strict = self.eat(&Tok::Strict);
        self.graph.directed = match self.peek() {
            Some(Tok::Digraph) => true,
            Some(Tok::Graph) => false,
            _ => return Err(self.unexpected("`graph` or `digraph`")),
        };
        self.pos += 1;
        if matches!(self.peek(), Some(Tok::Id(_))) {
            self.graph.id = Some(self.id()?);
        }
        self.expect(&Tok::LBrace)?;
        self.stmt_list(true)?;
        self.expect(&Tok::RBrace)?;
        if self.peek().is_some() {
            return Err(self.unexpected("end of input"));
        }
        tracing::debug!(
            nodes = self.graph.nodes.len(),
            edges = self.graph.edges.len(),
            directed = self.graph.directed,
            "DOT graph parsed"
        );
        Ok(self.graph)
    }

    /// Parses statements up to (not including) the closing `}`; returns the nodes mentioned.
    fn stmt_list(&mut self, top_level: bool) -> Result<Vec<String>> {
        let mut mentioned = Vec::new();
        while !matches!(self.peek(), Some(Tok::RBrace) | None) {
            self.stmt(top_level, &mut mentioned)?;
            self.eat(&Tok::Semi);
        }
        Ok(mentioned)
    }

    fn stmt(&mut self, top_level: bool, mentioned: &mut Vec<String>) -> Result<()> {
        match self.peek() {
            Some(Tok::Graph) => {
                self.pos += 1;
                let attrs = self.attr_lists()?;
                if top_level {
                    self.graph.attrs.extend(attrs);
                }
            }
            Some(Tok::Node) => {
                self.pos += 1;
                let attrs = self.attr_lists()?;
                self.scope().node_defaults.extend(attrs);
            }
            Some(Tok::Edge) => {
                self.pos += 1;
                let attrs = self.attr_lists()?;
                self.scope().edge_defaults.extend(attrs);
            }
            Some(Tok::Id(_)) if self.peek_at(1) == Some(&Tok::Eq) => {
                let key = self.id()?;
                self.pos += 1;
                let value = self.id()?;
                if top_level {
                    self.graph.attrs.insert(key, value);
                }
            }
            Some(Tok::Id(_) | Tok::Subgraph | Tok::LBrace) => {
                let first = self.endpoint()?;
                if matches!(self.peek(), Some(Tok::Arrow | Tok::Line)) {
                    self.edge_stmt(first, mentioned)?;
                } else {
                    let is_node = first.is_node;
                    mentioned.extend(first.nodes.iter().cloned());
                    let attrs = if matches!(self.peek(), Some(Tok::LBracket)) {
                        self.attr_lists()?
                    } else {
                        DotAttrs::new()
                    };
                    if is_node {
                        for id in &first.nodes {
                            self.touch_node(id, Some(&attrs));
                        }
                    }
                }
            }
            _ => return Err(self.unexpected("a statement")),
        }
        Ok(())
    }

    fn edge_stmt(&mut self, first: Endpoint, mentioned: &mut Vec<String>) -> Result<()> {
        let mut chain = vec![first];
        while let Some(op) = self.peek().cloned() {
            match (op, self.graph.directed) {
                (Tok::Arrow, true) | (Tok::Line, false) => self.pos += 1,
                (Tok::Arrow, false) => return Err(self.error("`->` in an undirected graph")),
                (Tok::Line, true) => return Err(self.error("`--` in a directed graph")),
                _ => break,
            }
            chain.push(self.endpoint()?);
        }
        let attrs = if matches!(self.peek(), Some(Tok::LBracket)) {
            self.attr_lists()?
        } else {
            DotAttrs::new()
        };

        let mut merged = self.scope().edge_defaults.clone();
        merged.extend(attrs);
        for pair in chain.windows(2) {
            for source in &pair[0].nodes {
                for target in &pair[1].nodes {
                    self.add_edge(source, target, &merged);
                }
            }
        }
        for endpoint in chain {
            mentioned.extend(endpoint.nodes);
        }
        Ok(())
    }

    fn endpoint(&mut self) -> Result<Endpoint> {
        match self.peek() {
            Some(Tok::Subgraph | Tok::LBrace) => Ok(Endpoint {
                nodes: self.subgraph()?,
                is_node: false,
            }),
            Some(Tok::Id(_)) => {
                let id = self.id()?;
                self.port()?;
                self.touch_node(&id, None);
                Ok(Endpoint {
                    nodes: vec![id],
                    is_node: true,
                })
            }
            _ => Err(self.unexpected("a node or subgraph")),
        }
    }

    /// Ports only affect where Graphviz attaches an edge; they are parsed and dropped.
    fn port(&mut self) -> Result<()> {
        while self.eat(&Tok::Colon) {
            self.id()?;
        }
        Ok(())
    }

    fn subgraph(&mut self) -> Result<Vec<String>> {
        if self.eat(&Tok::Subgraph) && matches!(self.peek(), Some(Tok::Id(_))) {
            self.id()?;
        }
        self.expect(&Tok::LBrace)?;
        let inherited = self.scopes.last().cloned().unwrap_or_default();
        self.scopes.push(inherited);
        let nodes = self.stmt_list(false);
        self.scopes.pop();
        let nodes = nodes?;
        self.expect(&Tok::RBrace)?;
        Ok(nodes)
    }

    fn attr_lists(&mut self) -> Result<DotAttrs> {
        let mut attrs = DotAttrs::new();
        if !matches!(self.peek(), Some(Tok::LBracket)) {
            return Err(self.unexpected("`[`"));
        }
        while self.eat(&Tok::LBracket) {
            while !self.eat(&Tok::RBracket) {
                let key = self.id()?;
                self.expect(&Tok::Eq)?;
                let value = self.id()?;
                attrs.insert(key, value);
                if !self.eat(&Tok::Comma) {
                    self.eat(&Tok::Semi);
                }
            }
        }
        Ok(attrs)
    }

    /// Creates the node with the current defaults if needed, then applies `attrs`.
    fn touch_node(&mut self, id: &str, attrs: Option<&DotAttrs>) {
        if !self.graph.nodes.contains_key(id) {
            let defaults = self.scope().node_defaults.clone();
            self.graph.nodes.insert(id.to_string(), defaults);
        }
        if let (Some(attrs), Some(node)) = (attrs, self.graph.nodes.get_mut(id)) {
            node.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }

    fn add_edge(&mut self, source: &str, target: &str, attrs: &DotAttrs) {
        if self.graph.strict {
            let directed = self.graph.directed;
            let existing = self.graph.edges.iter_mut().find(|e| {
                (e.source == source && e.target == target)
                    || (!directed && e.source == target && e.target == source)
            });
            if let Some(edge) = existing {
                edge.attrs.extend(attrs.iter().map(|(k, v)| (k.clone(), v.clone())));
                return;
            }
        }
        self.graph.edges.push(DotEdge {
            source: source.to_string(),
            target: target.to_string(),
            attrs: attrs.clone(),
        });
    }
}

struct Endpoint {
    nodes: Vec<String>,
    /// A plain node id rather than a subgraph.
    is_node: bool,
}

#[cfg(test)]
mod tests {
    use super::line_column;

    #[test]
    fn line_column_is_one_based() {
        let text = "digraph {\n  a -> ;\n}";
        assert_eq!(line_column(text, 0), (1, 1));
        assert_eq!(line_column(text, 17), (2, 8));
    }
}
