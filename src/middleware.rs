use crate::rules::{Rule, process_rules};

/// Decision produced by the middleware for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Serve this location (rewritten path plus the original query string)
	/// instead of the requested one.
	Rewrite(String),

	/// Pass the request through unmodified.
	Next,
}

/// Host-framework response hook.
///
/// Implementations translate the middleware decision into the host's
/// response primitives. The hook is injected explicitly at the call site
/// rather than reached through an ambient global, so the middleware carries
/// no environment coupling.
pub trait ResponseHook {
	type Output;

	/// Serve `location` in place of the requested path.
	fn rewrite(&self, location: &str) -> Self::Output;

	/// Continue with the request unmodified.
	fn next(&self) -> Self::Output;
}

/// Default hook for hosts without a rewrite primitive: reports the decision
/// as an [`Action`] and performs no side effects, leaving the caller to act
/// on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughHook;

impl ResponseHook for PassThroughHook {
	type Output = Action;

	fn rewrite(&self, location: &str) -> Action {
		Action::Rewrite(location.to_string())
	}

	fn next(&self) -> Action {
		Action::Next
	}
}

/// Options for middleware construction.
#[derive(Default)]
pub struct MiddlewareOptions {
	/// Log matching decisions.
	pub debug: bool,

	/// Sink for debug messages. Defaults to stderr.
	pub logger: Option<Box<dyn Fn(&str) + Send + Sync>>,
}

/// Request-routing middleware applying an ordered rewrite rule list.
///
/// A request is never failed because no rule matched; non-matching traffic
/// always passes through.
pub struct Middleware {
	rules: Vec<Rule>,
	options: MiddlewareOptions,
}

impl Middleware {
	/// Create middleware with default options.
	pub fn new(rules: Vec<Rule>) -> Self {
		Middleware {
			rules,
			options: MiddlewareOptions::default(),
		}
	}

	/// Create middleware with explicit options.
	pub fn with_options(rules: Vec<Rule>, options: MiddlewareOptions) -> Self {
		Middleware { rules, options }
	}

	/// Decide how to handle a request URI (a pathname with an optional
	/// query string).
	///
	/// Only the pathname is matched and rewritten; the query string is
	/// reattached to the rewritten path verbatim.
	pub fn handle(&self, uri: &str) -> Action {
		let (pathname, query) = split_uri(uri);

		self.log(&format!("checking: {pathname}"));

		let result = process_rules(pathname, &self.rules);

		match result.rewritten {
			Some(rewritten) if result.matched => {
				self.log(&format!(
					"matched rule: {}",
					result.rule.as_deref().unwrap_or("unnamed")
				));
				self.log(&format!("rewriting: {} -> {rewritten}", result.original));

				let location = match query {
					Some(query) => format!("{rewritten}?{query}"),
					None => rewritten,
				};
				Action::Rewrite(location)
			}
			_ => {
				self.log(&format!("no match for: {pathname}"));
				Action::Next
			}
		}
	}

	/// Run [`handle`](Middleware::handle) and dispatch the decision through
	/// a host hook.
	pub fn respond<H: ResponseHook>(&self, uri: &str, hook: &H) -> H::Output {
		match self.handle(uri) {
			Action::Rewrite(location) => hook.rewrite(&location),
			Action::Next => hook.next(),
		}
	}

	fn log(&self, message: &str) {
		if !self.options.debug {
			return;
		}

		match &self.options.logger {
			Some(logger) => logger(&format!("[reroute] {message}")),
			None => eprintln!("[reroute] {message}"),
		}
	}
}

/// Split a request URI at the first `?` into pathname and query string.
fn split_uri(uri: &str) -> (&str, Option<&str>) {
	match uri.split_once('?') {
		Some((pathname, query)) => (pathname, Some(query)),
		None => (uri, None),
	}
}
