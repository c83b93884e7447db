//  ██████╗  █████╗ ███████╗███████╗██╗███╗   ██╗ ██████╗
//  ██╔══██╗██╔══██╗██╔════╝██╔════╝██║████╗  ██║██╔════╝
//  ██████╔╝███████║███████╗███████╗██║██╔██╗ ██║██║  ███╗
//  ██╔═══╝ ██╔══██║╚════██║╚════██║██║██║╚██╗██║██║   ██║
//  ██║     ██║  ██║███████║███████║██║██║ ╚████║╚██████╔╝
//  ╚═╝     ╚═╝  ╚═╝╚══════╝╚══════╝╚═╝╚═╝  ╚═══╝ ╚═════╝

#[cfg(test)]
mod passing {
    use std::path::Path;

    use create_html::{HtmlTemplate, HtmlTemplateOptions};

    fn template(options: HtmlTemplateOptions) -> HtmlTemplate {
        HtmlTemplate::new(options).unwrap()
    }

    fn file_template() -> HtmlTemplate {
        template(HtmlTemplateOptions {
            template: Some("tests/_data_/basic/index.html".to_string()),
            ..HtmlTemplateOptions::default()
        })
    }

    #[test]
    fn template_base_name_by_default() {
        let mut template = file_template();
        let name = template
            .output_options_in(Some(Path::new("dist")), None, Path::new("/project"))
            .unwrap()
            .to_string();

        assert_eq!(name, "index.html");
        assert_eq!(template.output_file_name(), Some("index.html"));
    }

    #[test]
    fn output_file_parent_is_used_as_directory() {
        let mut template = file_template();

        assert_eq!(
            template
                .output_options_in(None, Some(Path::new("dist/bundle.js")), Path::new("/project"))
                .unwrap(),
            "index.html"
        );
    }

    #[test]
    fn file_name_is_reduced_to_base_name() {
        let mut template = template(HtmlTemplateOptions {
            template: Some("<html></html>".to_string()),
            file_name: Some("pages/home.html".to_string()),
            ..HtmlTemplateOptions::default()
        });

        assert_eq!(
            template
                .output_options_in(Some(Path::new("dist")), None, Path::new("/project"))
                .unwrap(),
            "home.html"
        );
    }

    #[test]
    fn file_name_skips_collision_check() {
        let mut template = template(HtmlTemplateOptions {
            template: Some("tests/_data_/basic/index.html".to_string()),
            file_name: Some("index.html".to_string()),
            ..HtmlTemplateOptions::default()
        });

        assert_eq!(
            template
                .output_options_in(
                    Some(Path::new("tests/_data_/basic")),
                    None,
                    Path::new("/project")
                )
                .unwrap(),
            "index.html"
        );
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
    use std::path::Path;

    use create_html::{CreateHtmlError, HtmlTemplate, HtmlTemplateOptions};

    #[test]
    fn output_would_overwrite_template() {
        let mut template = HtmlTemplate::new(HtmlTemplateOptions {
            template: Some("tests/_data_/basic/index.html".to_string()),
            ..HtmlTemplateOptions::default()
        })
        .unwrap();

        let result = template.output_options_in(
            Some(Path::new("tests/_data_/basic")),
            None,
            Path::new("/project"),
        );

        assert!(matches!(
            result,
            Err(CreateHtmlError::SameAsTemplate { .. })
        ));
        assert_eq!(template.output_file_name(), None);
    }

    #[test]
    fn output_file_next_to_template() {
        let mut template = HtmlTemplate::new(HtmlTemplateOptions {
            template: Some("./tests/_data_/basic/index.html".to_string()),
            ..HtmlTemplateOptions::default()
        })
        .unwrap();

        let result = template.output_options_in(
            None,
            Some(Path::new("tests/_data_/basic/bundle.js")),
            Path::new("/project"),
        );

        assert!(matches!(
            result,
            Err(CreateHtmlError::SameAsTemplate { .. })
        ));
    }
}
