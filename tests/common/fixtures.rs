//! Reusable view sources

/// View with a declared model type and one binding
pub const HELLO_VIEW: &str = "@model Greeting\n<p>Hello, @Model.Name!</p>\n";

/// Same model type, different markup
pub const HELLO_VIEW_V2: &str = "@model Greeting\n<h1>Hello, @Model.Name!</h1>\n";

/// View without a model declaration
pub const DYNAMIC_VIEW: &str = "<footer>@Model.Year</footer>\n";

/// View that fails to compile (unknown expression)
pub const BROKEN_VIEW: &str = "@model Greeting\n<p>@Oops</p>\n";
