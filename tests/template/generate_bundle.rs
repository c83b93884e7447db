//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::fs;
    use std::path::Path;

    use create_html::{
        Attributes, EmittedFile, HtmlTemplate, HtmlTemplateOptions, OneOrMany, OutputDescriptor,
        OutputFormat,
    };

    const TEMPLATE: &str = "tests/_data_/basic/index.html";
    const ICON: &str = "tests/_data_/basic/icon.png";
    const NORMALIZE_CSS: &str =
        "https://cdnjs.cloudflare.com/ajax/libs/normalize/8.0.1/normalize.min.css";
    const VUE: &str = "https://unpkg.com/vue@3/dist/vue.global.js";

    fn options() -> HtmlTemplateOptions {
        HtmlTemplateOptions {
            template: Some(TEMPLATE.to_string()),
            ..HtmlTemplateOptions::default()
        }
    }

    fn outputs() -> Vec<OutputDescriptor> {
        vec![
            OutputDescriptor::chunk("index.js", true),
            OutputDescriptor::asset("index.css"),
        ]
    }

    fn render(options: HtmlTemplateOptions, outputs: &[OutputDescriptor]) -> Vec<EmittedFile> {
        let mut template = HtmlTemplate::new(options).unwrap();
        template
            .output_options_in(Some(Path::new("dist")), None, Path::new("/project"))
            .unwrap();
        let mut files = Vec::new();
        template
            .generate_bundle(outputs, OutputFormat::Es, &mut files)
            .unwrap();
        files
    }

    fn html(files: &[EmittedFile], file_name: &str) -> String {
        let file = files
            .iter()
            .find(|file| file.file_name == file_name)
            .unwrap();
        file.source_str().unwrap().to_string()
    }

    fn page(head: &[&str], body: &[&str]) -> String {
        let mut lines = vec![
            "<!DOCTYPE html>",
            "<html lang=\"en\">",
            "  <head>",
            "    <meta charset=\"utf-8\" />",
            "    <meta name=\"viewport\" content=\"width=device-width\" />",
        ];
        lines.extend_from_slice(head);
        lines.extend_from_slice(&["  </head>", "  <body>", "    <div id=\"app\"></div>"]);
        lines.extend_from_slice(body);
        lines.extend_from_slice(&["  </body>", "</html>"]);
        lines.join("\n") + "\n"
    }

    #[test]
    fn full_options_from_config_file() {
        let options =
            HtmlTemplateOptions::load(Path::new("tests/_data_/basic/create-html.toml")).unwrap();
        let outputs = vec![
            OutputDescriptor::chunk("index.js", true),
            OutputDescriptor::chunk("test.js", true),
            OutputDescriptor::chunk("shared-4f2a.js", false),
            OutputDescriptor::asset("index.css"),
        ];
        let files = render(options, &outputs);

        let names: Vec<&str> = files.iter().map(|file| file.file_name.as_str()).collect();
        assert_eq!(names, vec!["icon.png", "index.html"]);
        assert_eq!(files[0].source, fs::read(ICON).unwrap());

        let normalize = format!("    <link href=\"{NORMALIZE_CSS}\" rel=\"stylesheet\">");
        let vue = format!("    <script src=\"{VUE}\"></script>");
        assert_eq!(
            html(&files, "index.html"),
            page(
                &[
                    "    <meta name=\"description\" content=\"create-html\">",
                    "    <title>create-html</title>",
                    &normalize,
                    "    <link href=\"./icon.png\" rel=\"icon\">",
                    "    <link href=\"./index.css\" rel=\"stylesheet\" media=\"screen and (max-width: 600px)\">",
                    "    <script src=\"./index.js\" type=\"module\" defer></script>",
                ],
                &[&vue],
            )
        );
    }

    #[test]
    fn inline_template() {
        let options = HtmlTemplateOptions {
            template: Some("<html></html>".to_string()),
            file_name: Some("index.html".to_string()),
            ..HtmlTemplateOptions::default()
        };
        let files = render(options, &outputs());

        assert_eq!(
            html(&files, "index.html"),
            "<html>\n  <head>\n    <link href=\"/index.css\" rel=\"stylesheet\">\n  </head>\n  <body>\n    <script src=\"/index.js\" type=\"module\"></script>\n  </body>\n</html>"
        );
    }

    #[test]
    fn template_file() {
        let files = render(options(), &outputs());

        assert_eq!(files.len(), 1);
        assert_eq!(
            html(&files, "index.html"),
            page(
                &["    <link href=\"/index.css\" rel=\"stylesheet\">"],
                &["    <script src=\"/index.js\" type=\"module\"></script>"],
            )
        );
    }

    #[test]
    fn title() {
        let files = render(
            HtmlTemplateOptions {
                title: Some("create-html".to_string()),
                ..options()
            },
            &outputs(),
        );

        assert_eq!(
            html(&files, "index.html"),
            page(
                &[
                    "    <title>create-html</title>",
                    "    <link href=\"/index.css\" rel=\"stylesheet\">",
                ],
                &["    <script src=\"/index.js\" type=\"module\"></script>"],
            )
        );
    }

    #[test]
    fn prefix() {
        let files = render(
            HtmlTemplateOptions {
                prefix: Some("./".to_string()),
                ..options()
            },
            &outputs(),
        );

        assert_eq!(
            html(&files, "index.html"),
            page(
                &["    <link href=\"./index.css\" rel=\"stylesheet\">"],
                &["    <script src=\"./index.js\" type=\"module\"></script>"],
            )
        );
    }

    #[test]
    fn prefix_without_trailing_slash() {
        let files = render(
            HtmlTemplateOptions {
                prefix: Some("https://cdn.example.com/app".to_string()),
                ..options()
            },
            &outputs(),
        );

        assert!(html(&files, "index.html")
            .contains("<link href=\"https://cdn.example.com/app/index.css\" rel=\"stylesheet\">"));
    }

    #[test]
    fn meta() {
        let files = render(
            HtmlTemplateOptions {
                meta: Some(OneOrMany::One(
                    Attributes::new()
                        .with("name", "description")
                        .with("content", "create-html"),
                )),
                ..options()
            },
            &outputs(),
        );

        assert_eq!(
            html(&files, "index.html"),
            page(
                &[
                    "    <meta name=\"description\" content=\"create-html\">",
                    "    <link href=\"/index.css\" rel=\"stylesheet\">",
                ],
                &["    <script src=\"/index.js\" type=\"module\"></script>"],
            )
        );
    }

    #[test]
    fn meta_list_replaces_by_name() {
        let files = render(
            HtmlTemplateOptions {
                meta: Some(OneOrMany::Many(vec![
                    Attributes::new()
                        .with("name", "description")
                        .with("content", "create-html"),
                    Attributes::new()
                        .with("name", "viewport")
                        .with("content", "width=device-width, initial-scale=1"),
                ])),
                ..options()
            },
            &outputs(),
        );

        assert_eq!(
            html(&files, "index.html"),
            [
                "<!DOCTYPE html>",
                "<html lang=\"en\">",
                "  <head>",
                "    <meta charset=\"utf-8\" />",
                "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">",
                "    <meta name=\"description\" content=\"create-html\">",
                "    <link href=\"/index.css\" rel=\"stylesheet\">",
                "  </head>",
                "  <body>",
                "    <div id=\"app\"></div>",
                "    <script src=\"/index.js\" type=\"module\"></script>",
                "  </body>",
                "</html>",
                "",
            ]
            .join("\n")
        );
    }

    #[test]
    fn inject_disabled() {
        let options: HtmlTemplateOptions =
            serde_json::from_str(&format!(r#"{{"template": "{TEMPLATE}", "inject": false}}"#))
                .unwrap();
        let files = render(options, &outputs());

        assert_eq!(
            html(&files, "index.html"),
            fs::read_to_string(TEMPLATE).unwrap()
        );
    }

    #[test]
    fn inject_per_file() {
        let options: HtmlTemplateOptions = serde_json::from_str(&format!(
            r#"{{
                "template": "{TEMPLATE}",
                "inject": {{
                    "index.js": {{"defer": true, "location": "head"}},
                    "index.css": {{"media": "screen and (max-width: 600px)"}},
                    "test.js": false
                }}
            }}"#
        ))
        .unwrap();
        let outputs = vec![
            OutputDescriptor::chunk("index.js", true),
            OutputDescriptor::chunk("test.js", true),
            OutputDescriptor::asset("index.css"),
        ];
        let files = render(options, &outputs);

        assert_eq!(
            html(&files, "index.html"),
            page(
                &[
                    "    <link href=\"/index.css\" rel=\"stylesheet\" media=\"screen and (max-width: 600px)\">",
                    "    <script src=\"/index.js\" type=\"module\" defer></script>",
                ],
                &[],
            )
        );
    }

    #[test]
    fn script() {
        let script = Attributes::new()
            .with("src", VUE)
            .with("location", "bodyEnd");
        let vue = format!("    <script src=\"{VUE}\"></script>");
        let expected = page(
            &["    <link href=\"/index.css\" rel=\"stylesheet\">"],
            &[
                &vue,
                "    <script src=\"/index.js\" type=\"module\"></script>",
            ],
        );

        let single = render(
            HtmlTemplateOptions {
                script: Some(OneOrMany::One(script.clone())),
                ..options()
            },
            &outputs(),
        );
        assert_eq!(html(&single, "index.html"), expected);

        let list = render(
            HtmlTemplateOptions {
                script: Some(OneOrMany::Many(vec![script])),
                ..options()
            },
            &outputs(),
        );
        assert_eq!(html(&list, "index.html"), expected);
    }

    #[test]
    fn script_at_body_start() {
        let files = render(
            HtmlTemplateOptions {
                script: Some(OneOrMany::One(
                    Attributes::new()
                        .with("src", VUE)
                        .with("location", "bodyStart"),
                )),
                ..options()
            },
            &outputs(),
        );

        assert!(html(&files, "index.html").contains(&format!(
            "  <body>\n    <script src=\"{VUE}\"></script>\n    <div id=\"app\"></div>\n"
        )));
    }

    #[test]
    fn link() {
        let files = render(
            HtmlTemplateOptions {
                link: Some(OneOrMany::One(
                    Attributes::new()
                        .with("href", NORMALIZE_CSS)
                        .with("rel", "stylesheet"),
                )),
                ..options()
            },
            &outputs(),
        );

        let normalize = format!("    <link href=\"{NORMALIZE_CSS}\" rel=\"stylesheet\">");
        assert_eq!(
            html(&files, "index.html"),
            page(
                &[&normalize, "    <link href=\"/index.css\" rel=\"stylesheet\">"],
                &["    <script src=\"/index.js\" type=\"module\"></script>"],
            )
        );
    }

    #[test]
    fn link_list_copies_local_files() {
        let files = render(
            HtmlTemplateOptions {
                link: Some(OneOrMany::Many(vec![
                    Attributes::new()
                        .with("href", NORMALIZE_CSS)
                        .with("rel", "stylesheet"),
                    Attributes::new().with("href", ICON).with("rel", "icon"),
                ])),
                ..options()
            },
            &outputs(),
        );

        let normalize = format!("    <link href=\"{NORMALIZE_CSS}\" rel=\"stylesheet\">");
        assert_eq!(
            html(&files, "index.html"),
            page(
                &[
                    &normalize,
                    "    <link href=\"/icon.png\" rel=\"icon\">",
                    "    <link href=\"/index.css\" rel=\"stylesheet\">",
                ],
                &["    <script src=\"/index.js\" type=\"module\"></script>"],
            )
        );
        assert!(files.iter().any(|file| file.file_name == "icon.png"));
    }

    #[test]
    fn missing_local_path_is_kept() {
        let files = render(
            HtmlTemplateOptions {
                link: Some(OneOrMany::One(
                    Attributes::new()
                        .with("href", "tests/_data_/basic/missing.png")
                        .with("rel", "icon"),
                )),
                ..options()
            },
            &outputs(),
        );

        assert_eq!(files.len(), 1);
        assert!(html(&files, "index.html")
            .contains("<link href=\"tests/_data_/basic/missing.png\" rel=\"icon\">"));
    }

    #[test]
    fn file_name() {
        let files = render(
            HtmlTemplateOptions {
                file_name: Some("test.html".to_string()),
                ..options()
            },
            &outputs(),
        );

        assert!(files.iter().any(|file| file.file_name == "test.html"));
    }

    #[test]
    fn non_es_format() {
        let template = HtmlTemplate::new(options()).unwrap();
        let files = template.render(&outputs(), OutputFormat::Iife).unwrap();

        assert!(html(&files, "index.html").contains("    <script src=\"/index.js\"></script>\n"));
    }
}

//  ███████╗ █████╗ ██╗██╗     ██╗███╗   ██╗ ██████╗
//  ██╔════╝██╔══██╗██║██║     ██║████╗  ██║██╔════╝
//  █████╗  ███████║██║██║     ██║██╔██╗ ██║██║  ███╗
//  ██╔══╝  ██╔══██║██║██║     ██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║██║███████╗██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚═╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod failing {
    use create_html::{
        Attributes, CreateHtmlError, EmittedFile, HtmlTemplate, HtmlTemplateOptions, OneOrMany,
        OutputDescriptor, OutputFormat,
    };

    #[test]
    fn template_without_html_tag() {
        let template = HtmlTemplate::new(HtmlTemplateOptions {
            template: Some("<body><div id=\"app\"></div></body>".to_string()),
            file_name: Some("index.html".to_string()),
            ..HtmlTemplateOptions::default()
        })
        .unwrap();
        let mut files: Vec<EmittedFile> = Vec::new();
        let result = template.generate_bundle(
            &[OutputDescriptor::chunk("index.js", true)],
            OutputFormat::Es,
            &mut files,
        );

        assert!(matches!(result, Err(CreateHtmlError::MissingHtmlTag)));
        assert!(files.is_empty());
    }

    #[test]
    fn directory_reference() {
        let template = HtmlTemplate::new(HtmlTemplateOptions {
            template: Some("tests/_data_/basic/index.html".to_string()),
            link: Some(OneOrMany::Many(vec![
                Attributes::new()
                    .with("href", "tests/_data_/basic/icon.png")
                    .with("rel", "icon"),
                Attributes::new()
                    .with("href", "tests/_data_/basic")
                    .with("rel", "preload"),
            ])),
            ..HtmlTemplateOptions::default()
        })
        .unwrap();
        let mut files: Vec<EmittedFile> = Vec::new();
        let result = template.generate_bundle(&[], OutputFormat::Es, &mut files);

        match result {
            Err(CreateHtmlError::InvalidReference { field, value }) => {
                assert_eq!(field, "href");
                assert_eq!(value, "tests/_data_/basic");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(files.is_empty());
    }

    #[test]
    fn missing_template() {
        let result = HtmlTemplate::new(HtmlTemplateOptions::default());
        assert!(matches!(result, Err(CreateHtmlError::MissingTemplate)));
    }

    #[test]
    fn missing_template_file_is_treated_as_markup() {
        let result = HtmlTemplate::new(HtmlTemplateOptions {
            template: Some("tests/_data_/basic/missing.html".to_string()),
            ..HtmlTemplateOptions::default()
        });
        assert!(matches!(result, Err(CreateHtmlError::MissingFileName)));
    }
}
