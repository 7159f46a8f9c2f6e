use regex::Regex;
use reqwest::Url;

/// Location of the `.pom` descriptor published next to an artifact.
///
/// The artifact file's trailing extension is swapped for `pom`, e.g.
/// `.../jsr305/3.0.2/jsr305-3.0.2.jar` becomes `.../jsr305/3.0.2/jsr305-3.0.2.pom`.
pub fn descriptor_url(artifact_url: &str) -> Option<Url> {
    let mut url = Url::parse(artifact_url.trim()).ok()?;
    let (parent, file_name) = url.path().rsplit_once('/')?;
    if file_name.is_empty() {
        return None;
    }

    let stem = match file_name.rsplit_once('.') {
        Some((stem, _extension)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    let path = format!("{parent}/{stem}.pom");

    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    Some(url)
}

// Optional namespace prefix, e.g. `<pom:licenses>`.
const PREFIX: &str = r"(?:[A-Za-z_][\w.-]*:)?";

fn element(name: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"(?s)<{PREFIX}{name}(?:\s[^>]*)?>(.*?)</{PREFIX}{name}\s*>"))
}

/// Extracts the `licenses/license/name` values from a POM document.
///
/// Matches elements with or without a namespace prefix, so both the default
/// Maven namespace and prefixed documents are handled.
#[derive(Debug, Clone)]
pub struct LicenseParser {
    comment: Regex,
    licenses: Regex,
    license: Regex,
    name: Regex,
}

impl LicenseParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            comment: Regex::new(r"(?s)<!--.*?-->")?,
            licenses: element("licenses")?,
            license: element("license")?,
            name: element("name")?,
        })
    }

    pub fn parse(&self, document: &str) -> Vec<String> {
        let document = self.comment.replace_all(document, "");
        let Some(licenses) = self.licenses.captures(&document) else {
            return Vec::new();
        };

        self.license
            .captures_iter(&licenses[1])
            .filter_map(|license| {
                self.name
                    .captures(&license[1])
                    .map(|name| decode_text(name[1].trim()))
            })
            .filter(|name| !name.is_empty())
            .collect()
    }
}

fn decode_text(text: &str) -> String {
    let cdata = text
        .strip_prefix("<![CDATA[")
        .and_then(|t| t.strip_suffix("]]>"));
    match cdata {
        Some(cdata) => cdata.trim().to_string(),
        None => text_entities(text),
    }
}

fn text_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
