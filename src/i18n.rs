//! Static UI label tables.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Pt,
    Ja,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub flag: &'static str,
}

#[derive(Debug)]
pub struct FormLabels {
    pub title: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub button: &'static str,
    /// Button text while the form is being submitted
    pub processing: &'static str,
}

#[derive(Debug)]
pub struct ErrorLabels {
    pub invalid_url: &'static str,
    pub extract_id: &'static str,
}

#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub description: &'static str,
    pub form: FormLabels,
    pub errors: ErrorLabels,
    pub results_title: &'static str,
    pub video_id: &'static str,
    pub download_by_size: &'static str,
    pub profile: &'static str,
    pub cover: &'static str,
    pub download: &'static str,
    pub copyright: &'static str,
    pub disclaimer: &'static str,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Pt,
        Language::Ja,
    ];

    /// Case-insensitive lookup; `None` for unsupported codes.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Like [`Language::from_code`] but falls back to English.
    pub fn from_code_or_default(code: &str) -> Self {
        Self::from_code(code).unwrap_or_default()
    }

    pub fn code(self) -> &'static str {
        self.info().code
    }

    pub fn info(self) -> LanguageInfo {
        let (code, name, short_name, flag) = match self {
            Language::En => ("en", "English", "EN", "🇺🇸"),
            Language::Es => ("es", "Español", "ES", "🇪🇸"),
            Language::Fr => ("fr", "Français", "FR", "🇫🇷"),
            Language::De => ("de", "Deutsch", "DE", "🇩🇪"),
            Language::Pt => ("pt", "Português", "PT", "🇧🇷"),
            Language::Ja => ("ja", "日本語", "JA", "🇯🇵"),
        };
        LanguageInfo {
            code,
            name,
            short_name,
            flag,
        }
    }

    pub fn labels(self) -> &'static Labels {
        match self {
            Language::En => &EN,
            Language::Es => &ES,
            Language::Fr => &FR,
            Language::De => &DE,
            Language::Pt => &PT,
            Language::Ja => &JA,
        }
    }
}

pub fn supported_languages() -> Vec<LanguageInfo> {
    Language::ALL.into_iter().map(Language::info).collect()
}

static EN: Labels = Labels {
    title: "YouTube Thumbnail Downloader",
    description: "Grab every thumbnail size of any YouTube video in one click.",
    form: FormLabels {
        title: "Enter a video URL",
        description: "Paste a youtube.com or youtu.be link to get its thumbnails.",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "Get thumbnails",
        processing: "Processing...",
    },
    errors: ErrorLabels {
        invalid_url: "Please enter a valid YouTube URL.",
        extract_id: "Could not extract the video ID from this URL.",
    },
    results_title: "Thumbnails",
    video_id: "Video ID",
    download_by_size: "Download by size",
    profile: "Profile picture",
    cover: "Cover image",
    download: "Download",
    copyright: "© YouTube Thumbnail Downloader. All rights reserved.",
    disclaimer: "Not affiliated with YouTube. Thumbnails belong to their respective owners.",
};

static ES: Labels = Labels {
    title: "Descargador de miniaturas de YouTube",
    description: "Obtén todos los tamaños de miniatura de cualquier video de YouTube con un clic.",
    form: FormLabels {
        title: "Introduce la URL de un video",
        description: "Pega un enlace de youtube.com o youtu.be para obtener sus miniaturas.",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "Obtener miniaturas",
        processing: "Procesando...",
    },
    errors: ErrorLabels {
        invalid_url: "Introduce una URL de YouTube válida.",
        extract_id: "No se pudo extraer el ID del video de esta URL.",
    },
    results_title: "Miniaturas",
    video_id: "ID del video",
    download_by_size: "Descargar por tamaño",
    profile: "Foto de perfil",
    cover: "Imagen de portada",
    download: "Descargar",
    copyright: "© Descargador de miniaturas de YouTube. Todos los derechos reservados.",
    disclaimer: "Sin afiliación con YouTube. Las miniaturas pertenecen a sus respectivos dueños.",
};

static FR: Labels = Labels {
    title: "Téléchargeur de miniatures YouTube",
    description: "Récupérez toutes les tailles de miniature d'une vidéo YouTube en un clic.",
    form: FormLabels {
        title: "Saisissez l'URL d'une vidéo",
        description: "Collez un lien youtube.com ou youtu.be pour obtenir ses miniatures.",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "Obtenir les miniatures",
        processing: "Traitement...",
    },
    errors: ErrorLabels {
        invalid_url: "Veuillez saisir une URL YouTube valide.",
        extract_id: "Impossible d'extraire l'identifiant de la vidéo depuis cette URL.",
    },
    results_title: "Miniatures",
    video_id: "ID de la vidéo",
    download_by_size: "Télécharger par taille",
    profile: "Photo de profil",
    cover: "Image de couverture",
    download: "Télécharger",
    copyright: "© Téléchargeur de miniatures YouTube. Tous droits réservés.",
    disclaimer: "Non affilié à YouTube. Les miniatures appartiennent à leurs propriétaires.",
};

static DE: Labels = Labels {
    title: "YouTube-Thumbnail-Downloader",
    description: "Alle Thumbnail-Größen eines YouTube-Videos mit einem Klick.",
    form: FormLabels {
        title: "Video-URL eingeben",
        description: "Füge einen youtube.com- oder youtu.be-Link ein, um die Thumbnails zu erhalten.",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "Thumbnails abrufen",
        processing: "Wird verarbeitet...",
    },
    errors: ErrorLabels {
        invalid_url: "Bitte gib eine gültige YouTube-URL ein.",
        extract_id: "Die Video-ID konnte nicht aus dieser URL gelesen werden.",
    },
    results_title: "Thumbnails",
    video_id: "Video-ID",
    download_by_size: "Nach Größe herunterladen",
    profile: "Profilbild",
    cover: "Titelbild",
    download: "Herunterladen",
    copyright: "© YouTube-Thumbnail-Downloader. Alle Rechte vorbehalten.",
    disclaimer: "Nicht mit YouTube verbunden. Thumbnails gehören ihren jeweiligen Eigentümern.",
};

static PT: Labels = Labels {
    title: "Baixador de miniaturas do YouTube",
    description: "Baixe todos os tamanhos de miniatura de qualquer vídeo do YouTube com um clique.",
    form: FormLabels {
        title: "Digite a URL de um vídeo",
        description: "Cole um link do youtube.com ou youtu.be para obter as miniaturas.",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "Obter miniaturas",
        processing: "Processando...",
    },
    errors: ErrorLabels {
        invalid_url: "Digite uma URL do YouTube válida.",
        extract_id: "Não foi possível extrair o ID do vídeo desta URL.",
    },
    results_title: "Miniaturas",
    video_id: "ID do vídeo",
    download_by_size: "Baixar por tamanho",
    profile: "Foto de perfil",
    cover: "Imagem de capa",
    download: "Baixar",
    copyright: "© Baixador de miniaturas do YouTube. Todos os direitos reservados.",
    disclaimer: "Sem afiliação com o YouTube. As miniaturas pertencem aos seus respectivos donos.",
};

static JA: Labels = Labels {
    title: "YouTube サムネイルダウンローダー",
    description: "YouTube 動画のサムネイルを全サイズまとめて取得できます。",
    form: FormLabels {
        title: "動画の URL を入力",
        description: "youtube.com または youtu.be のリンクを貼り付けてください。",
        placeholder: "https://www.youtube.com/watch?v=...",
        button: "サムネイルを取得",
        processing: "処理中...",
    },
    errors: ErrorLabels {
        invalid_url: "有効な YouTube の URL を入力してください。",
        extract_id: "この URL から動画 ID を取得できませんでした。",
    },
    results_title: "サムネイル",
    video_id: "動画 ID",
    download_by_size: "サイズ別にダウンロード",
    profile: "プロフィール画像",
    cover: "カバー画像",
    download: "ダウンロード",
    copyright: "© YouTube サムネイルダウンローダー. All rights reserved.",
    disclaimer: "YouTube とは提携していません。サムネイルの権利は各所有者に帰属します。",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("de"), Some(Language::De));
        assert_eq!(Language::from_code(" JA "), Some(Language::Ja));
        assert_eq!(Language::from_code("xx"), None);
        assert_eq!(Language::from_code_or_default("xx"), Language::En);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes = Language::ALL.map(Language::code).to_vec();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), Language::ALL.len());
    }

    #[test]
    fn test_every_table_is_complete() {
        for lang in Language::ALL {
            let l = lang.labels();
            let all = [
                l.title,
                l.description,
                l.form.title,
                l.form.description,
                l.form.placeholder,
                l.form.button,
                l.form.processing,
                l.errors.invalid_url,
                l.errors.extract_id,
                l.results_title,
                l.video_id,
                l.download_by_size,
                l.profile,
                l.cover,
                l.download,
                l.copyright,
                l.disclaimer,
            ];
            assert!(
                all.iter().all(|s| !s.trim().is_empty()),
                "{} has an empty label",
                lang.code()
            );
        }
    }
}
