//! Regex catalogues for the search phases. Each template holds `{}` where
//! the escaped target is spliced in.

/// Ways JVM and Python code read a configuration property.
pub const PROPERTY_ACCESS: [&str; 8] = [
    // Java
    r"@Value.*{}",
    r"getProperty.*{}",
    r"getString.*{}",
    r"properties\.get.*{}",
    // Python
    r"config\[.*{}.*\]",
    r"os\.environ.*{}",
    r"settings\.{}",
    r"get.*{}",
];

/// HTTP client calls in Java, Kotlin and Scala sources.
pub const JVM_HTTP_CALLS: [&str; 9] = [
    // RestTemplate
    r"restTemplate\.(get|post|put|delete|exchange)ForObject",
    r"restTemplate\.exchange",
    // WebClient
    r"webClient\..*\.(get|post|put|delete)\(\)",
    // Apache HttpClient
    r"HttpGet|HttpPost|HttpPut|HttpDelete",
    r"httpClient\.execute",
    // OkHttp
    r"Request\.Builder\(\)",
    r"okHttpClient\.newCall",
    // Retrofit
    r"@(GET|POST|PUT|DELETE)\(",
    // JAX-RS
    r"@Path\(",
];

/// HTTP client calls in Python sources.
pub const PYTHON_HTTP_CALLS: [&str; 7] = [
    r"requests\.(get|post|put|delete|patch)",
    r"urllib\.request\.urlopen",
    r"urllib2\.urlopen",
    r"httpx\.(get|post|put|delete)",
    r"session\.(get|post|put|delete)",
    r"aiohttp\.ClientSession",
    r"client\.(get|post|put|delete)",
];

/// Declarations, member access and call arguments of a variable.
pub const VARIABLE_USAGE: [&str; 3] = [r"{}\s*=", r"{}\.", r"\({}[,\)]"];

/// Client types grepped for in the exploratory pass.
pub const HTTP_CLIENT_TYPES: &str = "(RestTemplate|requests|HttpClient|WebClient)";

pub const JVM_EXTENSIONS: [&str; 3] = ["java", "kt", "scala"];
pub const PYTHON_EXTENSIONS: [&str; 1] = ["py"];

pub fn fill(template: &str, escaped: &str) -> String {
    template.replace("{}", escaped)
}
