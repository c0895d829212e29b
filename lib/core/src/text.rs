//! Text helpers shared by the content forms: URL-safe slugs and
//! YouTube video-id extraction.

/// Generate a URL slug from a display name.
///
/// Lowercases, strips Spanish accents, drops everything that is not
/// `[a-z0-9 -]`, turns whitespace runs into single hyphens and collapses
/// repeated hyphens: `"Ingeniería de Sistemas"` → `"ingenieria-de-sistemas"`.
pub fn generar_slug(texto: &str) -> String {
    let mut plano = String::with_capacity(texto.len());
    for c in texto.to_lowercase().chars() {
        let mapped = match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        };
        if mapped.is_ascii_alphanumeric() || mapped == ' ' || mapped == '-' {
            plano.push(mapped);
        }
    }

    let mut slug = String::with_capacity(plano.len());
    let mut prev_hyphen = false;
    for c in plano.trim().chars() {
        let c = if c == ' ' { '-' } else { c };
        if c == '-' {
            if !prev_hyphen {
                slug.push('-');
            }
            prev_hyphen = true;
        } else {
            slug.push(c);
            prev_hyphen = false;
        }
    }
    slug.trim_matches('-').to_string()
}

/// Extract the 11-character YouTube video id from a URL.
///
/// Accepts a bare id, `watch?v=`, `youtu.be/`, `/embed/` and `/v/`
/// forms. Returns `None` when no id can be extracted.
pub fn extraer_youtube_id(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if es_id_video(url) {
        return Some(url.to_string());
    }

    const MARCAS: &[&str] = &["watch?v=", "youtu.be/", "/embed/", "/v/"];
    for marca in MARCAS {
        if let Some(pos) = url.find(marca) {
            let resto = &url[pos + marca.len()..];
            if resto.len() >= 11 {
                let candidato = &resto[..11];
                if es_id_video(candidato) {
                    return Some(candidato.to_string());
                }
            }
        }
    }
    None
}

fn es_id_video(s: &str) -> bool {
    s.len() == 11
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generar_slug() {
        assert_eq!(generar_slug("Ingeniería de Sistemas"), "ingenieria-de-sistemas");
        assert_eq!(generar_slug("Física   y  Matemática"), "fisica-y-matematica");
        assert_eq!(generar_slug("  Diseño Gráfico!  "), "diseno-grafico");
        assert_eq!(generar_slug("a--b"), "a-b");
        assert_eq!(generar_slug(""), "");
    }

    #[test]
    fn test_extraer_youtube_id() {
        assert_eq!(
            extraer_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=30s").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extraer_youtube_id("https://youtu.be/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extraer_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ").as_deref(),
            Some("dQw4w9WgXcQ")
        );
        // A bare id passes through.
        assert_eq!(extraer_youtube_id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(extraer_youtube_id(""), None);
        assert_eq!(extraer_youtube_id("https://vimeo.com/12345"), None);
    }
}
